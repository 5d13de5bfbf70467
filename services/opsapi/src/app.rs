//! Operations API HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
//!
//! # Notes
//! This module centralizes route composition to keep `main` small and
//! testable.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::auth;
use crate::auth::{TokenIssuer, TokenVerifier};
use crate::observability;
use crate::store::OpsStore;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub api_version: String,
    pub store: Arc<dyn OpsStore + Send + Sync>,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
    pub dev_auth_enabled: bool,
    pub token_ttl_secs: u64,
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            let parent = observability::trace_context_from_headers(request.headers());
            let span = tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            );
            span.set_parent(parent);
            span
        });

    Router::new()
        .route(
            "/v1/system/info",
            axum::routing::get(api::system::system_info),
        )
        .route(
            "/v1/system/health",
            axum::routing::get(api::system::system_health),
        )
        .route(
            "/v1/auth/token",
            axum::routing::post(auth::dev::issue_dev_token),
        )
        .route(
            "/v1/events",
            axum::routing::get(api::events::list_events).post(api::events::create_event),
        )
        .route(
            "/v1/events/:event_id",
            axum::routing::get(api::events::get_event)
                .patch(api::events::patch_event)
                .delete(api::events::delete_event),
        )
        .route(
            "/v1/tasks",
            axum::routing::get(api::tasks::list_tasks).post(api::tasks::create_task),
        )
        .route(
            "/v1/tasks/:task_id",
            axum::routing::get(api::tasks::get_task)
                .patch(api::tasks::patch_task)
                .delete(api::tasks::delete_task),
        )
        .route(
            "/v1/venue-features",
            axum::routing::get(api::venues::list_features).post(api::venues::create_feature),
        )
        .route(
            "/v1/venue-features/:feature_id",
            axum::routing::get(api::venues::get_feature)
                .patch(api::venues::patch_feature)
                .delete(api::venues::delete_feature),
        )
        .route(
            "/v1/users",
            axum::routing::get(api::users::list_users).post(api::users::create_user),
        )
        .route(
            "/v1/users/:user_id",
            axum::routing::get(api::users::get_user)
                .patch(api::users::patch_user)
                .delete(api::users::delete_user),
        )
        .route(
            "/v1/activity",
            axum::routing::get(api::activity::list_activity),
        )
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/v1/openapi.json", ApiDoc::openapi()),
        )
        .layer(trace_layer)
        .with_state(state)
}
