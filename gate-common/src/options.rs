//! Request-level options attached to an outgoing chat call.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Mutable bag of request parameters.
///
/// Only `betas` is interpreted here. Every other key the host sends is kept
/// in `extra` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Ordered beta/feature tokens. `None` is an absent key, `Some(None)` an
    /// explicit `null`; both read as empty and are written back as received.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub betas: Option<Option<Vec<String>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RequestOptions {
    pub fn with_betas<I, S>(betas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            betas: Some(Some(betas.into_iter().map(Into::into).collect())),
            extra: Map::new(),
        }
    }

    /// Current tokens, empty when none were set.
    pub fn betas(&self) -> &[String] {
        self.betas.as_ref().and_then(|b| b.as_deref()).unwrap_or(&[])
    }

    pub fn has_beta(&self, token: &str) -> bool {
        self.betas().iter().any(|b| b == token)
    }

    /// Append a token at the end, keeping existing order.
    pub fn push_beta(&mut self, token: impl Into<String>) {
        self.betas
            .get_or_insert(None)
            .get_or_insert_with(Vec::new)
            .push(token.into());
    }
}

/// Runs only when the key is present, so `null` becomes `Some(None)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Some)
}
