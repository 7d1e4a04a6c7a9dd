use async_trait::async_trait;
use pricesnap_errors::AppError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A hosted text-completion service that answers with a JSON object.
///
/// Both semantic calls in the pipeline (the block classifier and the
/// product extractor) go through this trait, so either can be swapped for a
/// stub in tests.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends `instruction` followed by `context` and returns the raw reply
    /// content, which the caller still has to parse.
    async fn complete_json(&self, instruction: &str, context: &str) -> Result<String, AppError>;
}

/// Parses reply content that must be a single JSON object.
///
/// Arrays and scalars are rejected before deserialization, since derived
/// struct impls would otherwise fill fields from an array by position.
pub fn parse_json_object<T: DeserializeOwned>(reply: &str, label: &str) -> Result<T, AppError> {
    let value: Value = serde_json::from_str(reply)
        .map_err(|e| AppError::MalformedReply(format!("{}: {}", label, e)))?;

    if !value.is_object() {
        return Err(AppError::MalformedReply(format!(
            "{}: expected a JSON object",
            label
        )));
    }

    serde_json::from_value(value).map_err(|e| AppError::MalformedReply(format!("{}: {}", label, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Flag {
        #[serde(default)]
        on: bool,
    }

    #[test]
    fn test_object_is_parsed() {
        let flag: Flag = parse_json_object(r#"{"on": true}"#, "flag").unwrap();
        assert!(flag.on);
    }

    #[test]
    fn test_non_objects_are_rejected() {
        for reply in ["[true]", "[]", "true", "\"on\"", "3", "null"] {
            let err = parse_json_object::<Flag>(reply, "flag").unwrap_err();
            assert!(
                matches!(err, AppError::MalformedReply(ref msg) if msg.starts_with("flag: ")),
                "reply {:?} gave {:?}",
                reply,
                err
            );
        }
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let err = parse_json_object::<Flag>(r#"{"on": "yes"}"#, "flag").unwrap_err();
        assert!(matches!(err, AppError::MalformedReply(_)));
    }
}
