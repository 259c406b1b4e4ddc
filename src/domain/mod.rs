//! Domain layer: strong types with validation and invariants (no I/O).

mod compose;
mod request;
mod response;
mod validation;
mod value;

pub use compose::{ComposedMessage, ELLIPSIS, SEGMENT_LIMIT, compose_body, truncate_chars};
pub use request::SendMessage;
pub use response::ProviderError;
pub use validation::ValidationError;
pub use value::{
    AccountSid, AuthToken, LongUrl, RecipientAddress, SenderAddress, ShortUrl, ShortenerTemplate,
};
