use crate::domain::compose::{ComposedMessage, SEGMENT_LIMIT, truncate_chars};
use crate::domain::value::{RecipientAddress, SenderAddress};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single outbound message.
///
/// The body is capped at [`SEGMENT_LIMIT`] characters on construction, even
/// when it did not come from [`crate::domain::compose_body`].
pub struct SendMessage {
    from: SenderAddress,
    to: RecipientAddress,
    body: String,
}

impl SendMessage {
    /// Form field name for the message text (`Body`).
    pub const BODY_FIELD: &'static str = "Body";

    pub fn new(from: SenderAddress, to: RecipientAddress, body: impl AsRef<str>) -> Self {
        Self {
            from,
            to,
            body: truncate_chars(body.as_ref(), SEGMENT_LIMIT).to_owned(),
        }
    }

    /// Build a request from an already composed message.
    pub fn composed(from: SenderAddress, to: RecipientAddress, body: ComposedMessage) -> Self {
        Self {
            from,
            to,
            body: body.into_string(),
        }
    }

    pub fn from(&self) -> &SenderAddress {
        &self.from
    }

    pub fn to(&self) -> &RecipientAddress {
        &self.to
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
