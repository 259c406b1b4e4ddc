//! Send one SMS through a Twilio-style REST API.
//!
//! The crate is split into a domain layer of validated types (including the
//! message composer), a transport layer for wire-format details, and a small
//! client layer that talks to the URL shortener and the messaging API.
//!
//! ```rust,no_run
//! use send_sms::{
//!     Credentials, RecipientAddress, SendMessage, SenderAddress, SmsClient, compose_body,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), send_sms::SmsError> {
//!     let client = SmsClient::new(Credentials::new("AC...", "...")?);
//!     let body = compose_body("deploy finished", None);
//!     let request = SendMessage::composed(
//!         SenderAddress::new("+15005550006")?,
//!         RecipientAddress::new("+15005550010")?,
//!         body,
//!     );
//!     client.send_message(request).await
//! }
//! ```
#![forbid(unsafe_code)]

pub mod cli;
pub mod client;
pub mod domain;
mod transport;

pub use client::{Credentials, DEFAULT_API_BASE, SmsClient, SmsClientBuilder, SmsError};
pub use domain::{
    AccountSid, AuthToken, ComposedMessage, ELLIPSIS, LongUrl, ProviderError, RecipientAddress,
    SEGMENT_LIMIT, SendMessage, SenderAddress, ShortUrl, ShortenerTemplate, ValidationError,
    compose_body, truncate_chars,
};
pub use transport::TransportError;
