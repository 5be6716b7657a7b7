use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// Fields a client may set on a record, in the order they are reported
pub const SUPPORTED_KEYS: [&str; 3] = ["quantity", "name", "description"];

/// Rejections of an inbound record payload
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Unsupported Keys Found: {} Supported Keys: {}", .0.join(", "), SUPPORTED_KEYS.join(", "))]
    UnsupportedKeys(Vec<String>),

    #[error("Request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Invalid item id: {0}")]
    MalformedPath(String),

    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error("Number cannot be stored as a decimal: {0}")]
    UnrepresentableNumber(String),
}

/// Reject any payload key outside [`SUPPORTED_KEYS`].
///
/// Offending keys are reported sorted so the message is stable.
pub fn validate_supported_keys(payload: &Map<String, JsonValue>) -> Result<(), ValidationError> {
    let mut extra_keys: Vec<String> = payload
        .keys()
        .filter(|key| !SUPPORTED_KEYS.contains(&key.as_str()))
        .cloned()
        .collect();

    if extra_keys.is_empty() {
        tracing::debug!("Keys are valid");
        Ok(())
    } else {
        extra_keys.sort();
        Err(ValidationError::UnsupportedKeys(extra_keys))
    }
}

/// Unwrap a request body that must be a JSON object
pub fn payload_object(body: JsonValue) -> Result<Map<String, JsonValue>, ValidationError> {
    match body {
        JsonValue::Object(fields) => Ok(fields),
        JsonValue::Null => Err(ValidationError::NotAnObject("null")),
        JsonValue::Bool(_) => Err(ValidationError::NotAnObject("a boolean")),
        JsonValue::Number(_) => Err(ValidationError::NotAnObject("a number")),
        JsonValue::String(_) => Err(ValidationError::NotAnObject("a string")),
        JsonValue::Array(_) => Err(ValidationError::NotAnObject("an array")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: JsonValue) -> Map<String, JsonValue> {
        payload_object(value).unwrap()
    }

    #[test]
    fn test_supported_subsets_are_accepted() {
        for payload in [
            json!({}),
            json!({"name": "widget"}),
            json!({"quantity": 3, "description": null}),
            json!({"quantity": [1, 2], "name": {"nested": true}, "description": "any value"}),
        ] {
            assert_eq!(validate_supported_keys(&object(payload)), Ok(()));
        }
    }

    #[test]
    fn test_unsupported_key_is_rejected() {
        let err = validate_supported_keys(&object(json!({"color": "red"}))).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedKeys(vec!["color".to_string()]));

        let message = err.to_string();
        assert!(message.contains("color"));
        assert!(message.contains("quantity, name, description"));
    }

    #[test]
    fn test_every_offending_key_is_reported() {
        let payload = object(json!({
            "name": "bolt",
            "size": "M8",
            "color": "red",
            "id": "client-chosen",
            "lastModified": "yesterday"
        }));

        let message = validate_supported_keys(&payload).unwrap_err().to_string();
        assert_eq!(
            message,
            "Unsupported Keys Found: color, id, lastModified, size Supported Keys: quantity, name, description"
        );
    }

    #[test]
    fn test_non_object_bodies_are_rejected() {
        assert_eq!(
            payload_object(json!([1, 2, 3])),
            Err(ValidationError::NotAnObject("an array"))
        );
        assert_eq!(payload_object(json!("text")), Err(ValidationError::NotAnObject("a string")));
        assert_eq!(payload_object(JsonValue::Null), Err(ValidationError::NotAnObject("null")));
    }
}
