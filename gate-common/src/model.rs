//! Model identity as resolved by the host for one outgoing request.

use serde::{Deserialize, Deserializer, Serialize};

/// Identifies the target model of a chat request.
///
/// Missing or `null` identifiers decode as empty strings so an incomplete
/// descriptor still reaches the gate, which passes it through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Serving backend, e.g. `google-vertex-anthropic`.
    #[serde(rename = "providerID", default, deserialize_with = "null_as_empty")]
    pub provider_id: String,
    /// Model/version identifier, e.g. `claude-sonnet-4-5@20250929`.
    #[serde(rename = "apiID", default, deserialize_with = "null_as_empty")]
    pub api_id: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ModelDescriptor {
    pub fn new(provider_id: impl Into<String>, api_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            api_id: api_id.into(),
        }
    }

    /// Both identifiers are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.provider_id.is_empty() && !self.api_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_descriptor_wire_keys() {
        let model = ModelDescriptor::new("google-vertex-anthropic", "claude-sonnet-4-5");
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["providerID"], "google-vertex-anthropic");
        assert_eq!(json["apiID"], "claude-sonnet-4-5");
    }

    #[test]
    fn test_missing_or_null_identifiers_decode_empty() {
        let model: ModelDescriptor =
            serde_json::from_str(r#"{"providerID": "google-vertex-anthropic"}"#).unwrap();
        assert_eq!(model.api_id, "");
        assert!(!model.is_complete());

        let model: ModelDescriptor =
            serde_json::from_str(r#"{"providerID": null, "apiID": "claude-sonnet-4-5"}"#).unwrap();
        assert_eq!(model.provider_id, "");
        assert_eq!(model.api_id, "claude-sonnet-4-5");
    }

    #[test]
    fn test_wrong_identifier_type_is_still_an_error() {
        let result: Result<ModelDescriptor, _> = serde_json::from_str(r#"{"apiID": 42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_model_descriptor_is_complete() {
        assert!(ModelDescriptor::new("openai", "gpt-4o").is_complete());
        assert!(!ModelDescriptor::new("", "gpt-4o").is_complete());
        assert!(!ModelDescriptor::new("openai", "").is_complete());
    }
}
