#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use encore_rbac::Role;
use opsapi::app::{AppState, build_router};
use opsapi::auth::{TokenIssuer, TokenVerifier};
use opsapi::model::UserRecord;
use opsapi::store::{StoreConfig, memory::InMemoryStore};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_SECRET: &str = "test-secret";

pub fn test_state() -> AppState {
    AppState {
        api_version: "v1".to_string(),
        store: Arc::new(InMemoryStore::new(StoreConfig {
            activity_retention: 100,
        })),
        issuer: Arc::new(TokenIssuer::new(TEST_SECRET, Duration::from_secs(600))),
        verifier: Arc::new(TokenVerifier::new(TEST_SECRET, 5)),
        dev_auth_enabled: true,
        token_ttl_secs: 600,
    }
}

pub fn test_app(state: AppState) -> axum::routing::RouterIntoService<Body, ()> {
    build_router(state).into_service()
}

/// Create a user with the role's default matrix and return it with a token.
pub async fn seed_user(state: &AppState, email: &str, role: Role) -> (UserRecord, String) {
    let user = state
        .store
        .create_user(UserRecord::new(email, email, role))
        .await
        .expect("create user");
    let token = state.issuer.mint(&user).expect("mint token");
    (user, token)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub fn authed_json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("build request")
}
