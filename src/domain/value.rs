use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender address for the `From` form field.
///
/// Usually an E.164 number or a messaging-service address such as
/// `whatsapp:+15005550006`. No normalization is performed.
///
/// Invariant: non-empty after trimming.
pub struct SenderAddress(String);

impl SenderAddress {
    /// Form field name used by the messaging API (`From`).
    pub const FIELD: &'static str = "From";

    /// Create a validated [`SenderAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Recipient address for the `To` form field.
///
/// Invariant: non-empty after trimming.
pub struct RecipientAddress(String);

impl RecipientAddress {
    /// Form field name used by the messaging API (`To`).
    pub const FIELD: &'static str = "To";

    /// Create a validated [`RecipientAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Account SID. Used both in the request path and as the basic-auth user.
///
/// Invariant: non-empty after trimming.
pub struct AccountSid(String);

impl AccountSid {
    pub const FIELD: &'static str = "AccountSid";

    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated SID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Auth token, sent as the basic-auth password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
/// The `Debug` output never contains the token.
pub struct AuthToken(String);

impl AuthToken {
    pub const FIELD: &'static str = "AuthToken";

    /// Create a validated [`AuthToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the token as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// URL-shortener endpoint with a single `%s` slot for the long URL.
///
/// Example: `https://is.gd/create.php?format=simple&url=%s`.
pub struct ShortenerTemplate(String);

impl ShortenerTemplate {
    /// Placeholder replaced by the long URL.
    pub const PLACEHOLDER: &'static str = "%s";

    /// Create a validated template.
    ///
    /// Exactly one placeholder is required.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "shortener" });
        }
        match trimmed.matches(Self::PLACEHOLDER).count() {
            0 => Err(ValidationError::MissingPlaceholder {
                template: trimmed.to_owned(),
            }),
            1 => Ok(Self(trimmed.to_owned())),
            count => Err(ValidationError::TooManyPlaceholders {
                template: trimmed.to_owned(),
                count,
            }),
        }
    }

    /// Borrow the raw template.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute `long_url` into the template and parse the result.
    ///
    /// The long URL is inserted verbatim; callers that need it escaped
    /// should put an already-encoded value in the template.
    pub fn expand(&self, long_url: &LongUrl) -> Result<url::Url, ValidationError> {
        let expanded = self.0.replacen(Self::PLACEHOLDER, long_url.as_str(), 1);
        url::Url::parse(&expanded).map_err(|err| ValidationError::InvalidUrl {
            input: expanded,
            reason: err.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Long URL to shorten and append to the message.
///
/// Invariant: non-empty after trimming. No URL syntax is enforced; shorteners
/// accept bare forms such as `example.com/page`, so the text is handed over
/// as supplied.
pub struct LongUrl(String);

impl LongUrl {
    /// Create a validated [`LongUrl`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "url" });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the URL as provided (trimmed).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Shortened URL returned by the shortener.
///
/// Invariant: non-empty after trimming.
pub struct ShortUrl(String);

impl ShortUrl {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "short URL" });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
