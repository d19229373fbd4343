//! Shared application state.

use crate::config::Config;
use crate::gate::CapabilityGate;

/// Shared application state passed to all handlers.
pub struct AppState {
    pub config: Config,
    pub gate: CapabilityGate,
}

impl AppState {
    pub fn new(config: Config, gate: CapabilityGate) -> Self {
        Self { config, gate }
    }
}
