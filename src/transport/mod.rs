//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod send_message;

pub use send_message::{
    TransportError, decode_error_json_response, encode_send_message_form, messages_url,
};
