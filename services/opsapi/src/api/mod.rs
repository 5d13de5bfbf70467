//! Operations API handler modules.
//!
//! # Purpose
//! Groups the HTTP handlers and the request-authentication helper every
//! data route runs before touching the store.
pub mod activity;
pub mod error;
pub mod events;
pub mod openapi;
pub mod system;
pub mod tasks;
pub mod types;
pub mod users;
pub mod venues;

use crate::api::error::{ApiError, api_forbidden, api_unauthorized};
use crate::app::AppState;
use axum::http::HeaderMap;
use encore_rbac::{AccessQuery, Identity};

/// Resolve the bearer token on a request to an [`Identity`].
///
/// Verification failures (bad signature, expiry, tags outside the closed
/// enums) all surface as 401; the engine never sees an unverified identity.
pub(crate) fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiError> {
    let bearer =
        extract_bearer(headers).ok_or_else(|| api_unauthorized("missing bearer token"))?;
    state.verifier.verify(bearer).map_err(|err| {
        tracing::debug!(error = %err, "token verification failed");
        api_unauthorized("invalid token")
    })
}

/// Record a denial server-side and produce the generic 403.
pub(crate) fn deny(identity: &Identity, query: &AccessQuery) -> ApiError {
    tracing::debug!(subject = %identity.subject, query = %query, "access denied");
    api_forbidden()
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(axum::http::header::AUTHORIZATION)?;
    let value = value.to_str().ok()?;
    value.strip_prefix("Bearer ")
}
