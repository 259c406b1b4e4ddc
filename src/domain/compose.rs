//! Message composition: append a short link and fit everything into one segment.
//!
//! Lengths are counted in Unicode scalar values (`char`), not bytes, so a
//! multi-byte body is never cut in the middle of a character.

use std::fmt;

use crate::domain::value::ShortUrl;

/// Maximum number of characters in a single message segment.
pub const SEGMENT_LIMIT: usize = 160;

/// Marker appended to a truncated body.
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Final message text.
///
/// Invariant: at most [`SEGMENT_LIMIT`] characters.
pub struct ComposedMessage(String);

impl ComposedMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ComposedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Return the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Compose the outgoing text from `body` and an optional shortened link.
///
/// The link is kept whole; the body gives way first. When the body has to be
/// cut it ends with [`ELLIPSIS`], and the result is exactly [`SEGMENT_LIMIT`]
/// characters long.
///
/// A link too long to fit next to the ellipsis leaves no room for the body;
/// the result is then `"..."` plus the link, capped at the limit.
pub fn compose_body(body: &str, short_url: Option<&ShortUrl>) -> ComposedMessage {
    let suffix = match short_url {
        Some(url) => format!("\n{}", url.as_str()),
        None => String::new(),
    };

    let body_len = body.chars().count();
    let suffix_len = suffix.chars().count();
    if body_len + suffix_len <= SEGMENT_LIMIT {
        return ComposedMessage(format!("{body}{suffix}"));
    }

    let ellipsis_len = ELLIPSIS.chars().count();
    let budget = (SEGMENT_LIMIT - ellipsis_len).saturating_sub(suffix_len);
    let composed = format!("{}{ELLIPSIS}{suffix}", truncate_chars(body, budget));

    ComposedMessage(truncate_chars(&composed, SEGMENT_LIMIT).to_owned())
}
