//! Payloads exchanged with the host's per-request extension point.

use serde::{Deserialize, Serialize};

use crate::model::ModelDescriptor;
use crate::options::RequestOptions;

/// Where the gate stopped for a given request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Provider or model identifier was empty
    MissingIdentity,
    /// Provider is not the extended-context provider
    WrongProvider,
    /// Model is not from the target family
    WrongFamily,
    /// Family matches but no supported variant pattern does
    UnsupportedVariant,
    /// Feature token was already set
    AlreadyPresent,
    /// Feature token was appended
    Injected,
}

impl Decision {
    pub const ALL: [Decision; 6] = [
        Decision::MissingIdentity,
        Decision::WrongProvider,
        Decision::WrongFamily,
        Decision::UnsupportedVariant,
        Decision::AlreadyPresent,
        Decision::Injected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingIdentity => "missing_identity",
            Self::WrongProvider => "wrong_provider",
            Self::WrongFamily => "wrong_family",
            Self::UnsupportedVariant => "unsupported_variant",
            Self::AlreadyPresent => "already_present",
            Self::Injected => "injected",
        }
    }

    /// Whether the options were mutated.
    pub fn is_injected(&self) -> bool {
        matches!(self, Self::Injected)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input of the `chat.params` hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub model: ModelDescriptor,
    #[serde(default)]
    pub options: RequestOptions,
}

/// Effective options for the request plus the decision that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookOutput {
    pub options: RequestOptions,
    pub decision: Decision,
}
