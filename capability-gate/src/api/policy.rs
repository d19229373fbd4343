//! Read-only view of the active eligibility policy.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::gate::GatePolicy;
use crate::state::AppState;

/// Build the policy router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/policy", get(policy))
}

/// GET /v1/policy - provider, family, token and allowlist in effect.
async fn policy(State(state): State<Arc<AppState>>) -> Json<GatePolicy> {
    Json(state.gate.policy().clone())
}
