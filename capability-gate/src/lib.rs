//! Context Gate - adds the extended-context beta token to eligible chat requests.

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod gate;
pub mod state;
pub mod stdio;

pub use crate::config::Config;
pub use diagnostics::{DiagnosticLogger, FileLogger, NoopLogger, TracingLogger};
pub use error::{Error, Result};
pub use gate::{CapabilityGate, GatePolicy, SupportedModelSet, CONTEXT_1M_BETA};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full HTTP application.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/v1", api::router())
        .route("/health", axum::routing::get(api::health::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Gate wired with the configured policy and diagnostics.
pub fn gate_from_config(config: &Config) -> CapabilityGate {
    CapabilityGate::with_logger(config.policy(), diagnostics::from_config(&config.diagnostics))
}
