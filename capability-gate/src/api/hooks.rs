//! Per-request hook endpoint called by the host before dispatching a chat request.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use gate_common::{HookInput, HookOutput};

use crate::error::{Error, Result};
use crate::state::AppState;

/// Build the hooks router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/hooks/chat-params", post(chat_params))
}

/// POST /v1/hooks/chat-params - return the effective options for one request.
async fn chat_params(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<HookOutput>> {
    let input: HookInput =
        serde_json::from_slice(&body).map_err(|e| Error::InvalidRequest(e.to_string()))?;

    let request_id = uuid::Uuid::new_v4().to_string();
    let (options, decision) = state
        .gate
        .apply_traced(&input.model, input.options, Some(&request_id));

    Ok(Json(HookOutput { options, decision }))
}
