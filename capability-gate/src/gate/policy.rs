//! Eligibility policy: which provider, family and variants get the feature token.

use serde::{Deserialize, Serialize};

/// Beta token enabling the 1M-token context window.
pub const CONTEXT_1M_BETA: &str = "context-1m-2025-08-07";

/// Provider that accepts the extended-context beta header.
pub const DEFAULT_PROVIDER_ID: &str = "google-vertex-anthropic";

/// Substring identifying the target model family.
pub const DEFAULT_FAMILY: &str = "claude";

/// Variant patterns known to accept the 1M context beta.
///
/// Matched as substrings of the model's API id, so dated, dotted and
/// hyphenated spellings each need a pattern that covers them.
pub const DEFAULT_SUPPORTED_MODELS: [&str; 5] = [
    "opus-4-6",
    "opus-4.6",
    "sonnet-4-5",
    "sonnet-4.5",
    "sonnet-4@20250514",
];

/// Ordered allowlist of substring patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupportedModelSet(Vec<String>);

impl SupportedModelSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(patterns.into_iter().map(Into::into).collect())
    }

    /// First pattern contained in `api_id`, if any.
    pub fn matching(&self, api_id: &str) -> Option<&str> {
        self.0
            .iter()
            .map(String::as_str)
            .find(|pattern| api_id.contains(*pattern))
    }

    pub fn patterns(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SupportedModelSet {
    fn default() -> Self {
        Self::new(DEFAULT_SUPPORTED_MODELS)
    }
}

/// Everything the gate compares a request against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatePolicy {
    pub provider_id: String,
    pub family: String,
    pub feature_token: String,
    pub supported_models: SupportedModelSet,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            provider_id: DEFAULT_PROVIDER_ID.to_string(),
            family: DEFAULT_FAMILY.to_string(),
            feature_token: CONTEXT_1M_BETA.to_string(),
            supported_models: SupportedModelSet::default(),
        }
    }
}
