//! HTTP hook surface.

pub mod health;
pub mod hooks;
pub mod policy;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(hooks::router())
        .merge(policy::router())
}
