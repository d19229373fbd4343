//! Configuration for the capability gate.

use std::env;
use std::path::Path;

use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::gate::policy::{
    GatePolicy, SupportedModelSet, CONTEXT_1M_BETA, DEFAULT_FAMILY, DEFAULT_PROVIDER_ID,
    DEFAULT_SUPPORTED_MODELS,
};

/// Shortcut toggle for diagnostics, read once at startup.
pub const DEBUG_ENV_VAR: &str = "CONTEXT_GATE_DEBUG";

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Hook server bind address.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Eligibility policy. The allowlist is data so it can follow upstream
/// support without a rebuild.
#[derive(Debug, Clone, Deserialize)]
pub struct GateConfig {
    #[serde(default = "default_provider_id")]
    pub provider_id: String,
    #[serde(default = "default_family")]
    pub family: String,
    #[serde(default = "default_feature_token")]
    pub feature_token: String,
    /// Substring patterns of eligible model variants, in match order.
    #[serde(default = "default_supported_models")]
    pub supported_models: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            provider_id: default_provider_id(),
            family: default_family(),
            feature_token: default_feature_token(),
            supported_models: default_supported_models(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DiagnosticsConfig {
    /// Record gate decisions (default: false).
    #[serde(default)]
    pub enabled: bool,
    /// Append records to this file instead of the tracing output.
    #[serde(default)]
    pub log_path: Option<String>,
}

// Default values
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8787
}
fn default_provider_id() -> String {
    DEFAULT_PROVIDER_ID.to_string()
}
fn default_family() -> String {
    DEFAULT_FAMILY.to_string()
}
fn default_feature_token() -> String {
    CONTEXT_1M_BETA.to_string()
}
fn default_supported_models() -> Vec<String> {
    DEFAULT_SUPPORTED_MODELS.iter().map(|s| s.to_string()).collect()
}

/// Interpret the debug toggle. Unset, empty or unrecognised leaves the
/// configured value alone.
fn parse_toggle(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. `CONTEXT_GATE_DEBUG` (diagnostics.enabled only)
    /// 2. Environment variables (GATE__SECTION__KEY format)
    /// 3. config.toml file (if present)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self> {
        Self::load_with(File::with_name("config").required(false))
    }

    /// Load from an explicit file, which must exist.
    pub fn load_file(path: &Path) -> Result<Self> {
        Self::load_with(File::from(path).required(true))
    }

    fn load_with(file: File<config::FileSourceFile, config::FileFormat>) -> Result<Self> {
        let debug = env::var(DEBUG_ENV_VAR).ok().and_then(|v| parse_toggle(&v));

        let config: Config = ConfigLoader::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("GATE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("gate.supported_models")
                    .try_parsing(true),
            )
            .set_override_option("diagnostics.enabled", debug)?
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the gate match everything or nothing
    /// meaningful.
    pub fn validate(&self) -> Result<()> {
        let gate = &self.gate;
        for (name, value) in [
            ("gate.provider_id", &gate.provider_id),
            ("gate.family", &gate.family),
            ("gate.feature_token", &gate.feature_token),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig(format!("{} must not be empty", name)));
            }
        }
        if let Some(i) = gate.supported_models.iter().position(|p| p.trim().is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "gate.supported_models[{}] must not be empty",
                i
            )));
        }
        Ok(())
    }

    /// Policy the gate runs with.
    pub fn policy(&self) -> GatePolicy {
        GatePolicy {
            provider_id: self.gate.provider_id.clone(),
            family: self.gate.family.clone(),
            feature_token: self.gate.feature_token.clone(),
            supported_models: SupportedModelSet::new(self.gate.supported_models.iter().cloned()),
        }
    }
}
