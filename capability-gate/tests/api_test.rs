//! Integration tests for the hook HTTP API.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use capability_gate::{app, AppState, CapabilityGate, Config, GatePolicy, SupportedModelSet};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    app(Arc::new(AppState::new(Config::default(), CapabilityGate::default())))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn hook_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/hooks/chat-params")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_hook_injects_for_vertex_sonnet() {
    let (status, body) = send(
        test_app(),
        hook_request(json!({
            "model": {"providerID": "google-vertex-anthropic", "apiID": "claude-sonnet-4-5-20250514"},
            "options": {"betas": []}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"], "injected");
    assert_eq!(body["options"]["betas"], json!(["context-1m-2025-08-07"]));
}

#[tokio::test]
async fn test_hook_passes_through_other_providers() {
    let (status, body) = send(
        test_app(),
        hook_request(json!({
            "model": {"providerID": "openai", "apiID": "claude-sonnet-4-5"},
            "options": {"betas": ["keep-me"], "temperature": 0.5}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"], "wrong_provider");
    assert_eq!(body["options"], json!({"betas": ["keep-me"], "temperature": 0.5}));
}

#[tokio::test]
async fn test_hook_does_not_duplicate_token() {
    let (_, body) = send(
        test_app(),
        hook_request(json!({
            "model": {"providerID": "google-vertex-anthropic", "apiID": "claude-sonnet-4.5"},
            "options": {"betas": ["context-1m-2025-08-07"]}
        })),
    )
    .await;

    assert_eq!(body["decision"], "already_present");
    assert_eq!(body["options"]["betas"], json!(["context-1m-2025-08-07"]));
}

#[tokio::test]
async fn test_hook_missing_options_is_empty() {
    let (status, body) = send(
        test_app(),
        hook_request(json!({
            "model": {"providerID": "google-vertex-anthropic", "apiID": "claude-haiku-4"}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"], "unsupported_variant");
    assert_eq!(body["options"], json!({}));
}

#[tokio::test]
async fn test_hook_missing_model_id_passes_through() {
    let (status, body) = send(
        test_app(),
        hook_request(json!({
            "model": {"providerID": "google-vertex-anthropic"},
            "options": {"betas": ["keep"]}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"], "missing_identity");
    assert_eq!(body["options"], json!({"betas": ["keep"]}));
}

#[tokio::test]
async fn test_hook_null_betas_round_trips() {
    let (_, body) = send(
        test_app(),
        hook_request(json!({
            "model": {"providerID": "openai", "apiID": "gpt-4o"},
            "options": {"betas": null, "x": 1}
        })),
    )
    .await;

    assert_eq!(body["decision"], "wrong_provider");
    assert_eq!(body["options"], json!({"betas": null, "x": 1}));
}

#[tokio::test]
async fn test_hook_rejects_malformed_payload() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/hooks/chat-params")
        .body(Body::from("{\"model\": 42}"))
        .unwrap();
    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request");
}

#[tokio::test]
async fn test_policy_endpoint_reports_custom_allowlist() {
    let policy = GatePolicy {
        supported_models: SupportedModelSet::new(["sonnet-4-5"]),
        ..GatePolicy::default()
    };
    let state = AppState::new(Config::default(), CapabilityGate::new(policy));
    let request = Request::builder().uri("/v1/policy").body(Body::empty()).unwrap();

    let (status, body) = send(app(Arc::new(state)), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider_id"], "google-vertex-anthropic");
    assert_eq!(body["feature_token"], "context-1m-2025-08-07");
    assert_eq!(body["supported_models"], json!(["sonnet-4-5"]));
}
