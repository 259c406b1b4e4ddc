use serde_json::{Map, Value};

use crate::domain::{AccountSid, ProviderError, RecipientAddress, SendMessage, SenderAddress};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Messages endpoint for `account_sid` under `api_base`.
pub fn messages_url(api_base: &str, account_sid: &AccountSid) -> String {
    format!(
        "{}/2010-04-01/Accounts/{}/Messages.json",
        api_base.trim_end_matches('/'),
        account_sid.as_str()
    )
}

pub fn encode_send_message_form(request: &SendMessage) -> Vec<(String, String)> {
    vec![
        (
            SenderAddress::FIELD.to_owned(),
            request.from().as_str().to_owned(),
        ),
        (
            RecipientAddress::FIELD.to_owned(),
            request.to().as_str().to_owned(),
        ),
        (SendMessage::BODY_FIELD.to_owned(), request.body().to_owned()),
    ]
}

/// Decode the JSON object the API returns alongside a non-2xx status.
///
/// Anything other than a JSON object (arrays included) is rejected.
pub fn decode_error_json_response(json: &str) -> Result<ProviderError, TransportError> {
    let parsed: Map<String, Value> = serde_json::from_str(json)?;
    Ok(ProviderError {
        code: parsed.get("code").and_then(Value::as_i64),
        message: text_field(&parsed, "message"),
        more_info: text_field(&parsed, "more_info"),
    })
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(value) => Some(value.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> SendMessage {
        SendMessage::new(
            SenderAddress::new("+15005550006").unwrap(),
            RecipientAddress::new("+15005550010").unwrap(),
            body,
        )
    }

    #[test]
    fn encode_form_params_in_order() {
        let params = encode_send_message_form(&request("hello\nhttp://x.co/abc"));
        assert_eq!(
            params,
            vec![
                ("From".to_owned(), "+15005550006".to_owned()),
                ("To".to_owned(), "+15005550010".to_owned()),
                ("Body".to_owned(), "hello\nhttp://x.co/abc".to_owned()),
            ]
        );
    }

    #[test]
    fn messages_url_is_path_parameterized_by_sid() {
        let sid = AccountSid::new("AC123").unwrap();
        assert_eq!(
            messages_url("https://api.twilio.com", &sid),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
        assert_eq!(
            messages_url("http://127.0.0.1:8080/", &sid),
            "http://127.0.0.1:8080/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn decode_error_response_extracts_fields() {
        let json = r#"
        {
          "code": 21211,
          "message": "Invalid 'To' Phone Number",
          "more_info": "https://provider/errors/21211",
          "status": 400
        }
        "#;

        let err = decode_error_json_response(json).unwrap();
        assert_eq!(err.code, Some(21211));
        assert_eq!(err.message.as_deref(), Some("Invalid 'To' Phone Number"));
        assert_eq!(
            err.more_info.as_deref(),
            Some("https://provider/errors/21211")
        );
    }

    #[test]
    fn decode_error_response_tolerates_missing_and_null_fields() {
        let err = decode_error_json_response(r#"{"message": null}"#).unwrap();
        assert_eq!(err, ProviderError::default());
    }

    #[test]
    fn decode_error_response_rejects_non_json() {
        assert!(matches!(
            decode_error_json_response("<html>Internal Server Error</html>"),
            Err(TransportError::Json(_))
        ));
        assert!(decode_error_json_response("").is_err());
    }

    #[test]
    fn decode_error_response_rejects_json_that_is_not_an_object() {
        for body in ["[]", r#"[400, "m", "i"]"#, r#""oops""#, "42", "null"] {
            assert!(
                matches!(decode_error_json_response(body), Err(TransportError::Json(_))),
                "accepted {body}"
            );
        }
    }

    #[test]
    fn decode_error_response_keeps_non_string_fields_as_json_text() {
        let err = decode_error_json_response(r#"{"message": 7, "more_info": {"a": 1}}"#).unwrap();
        assert_eq!(err.message.as_deref(), Some("7"));
        assert_eq!(err.more_info.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(err.code, None);
    }
}
