//! Development token endpoint.
//!
//! Mints a bearer token for a known user by email. Disabled unless
//! `ENCORE_DEV_AUTH` is set; production deployments authenticate against
//! the SSO provider instead and this endpoint stays dark.
use crate::api::error::{
    ApiError, api_forbidden, api_internal, api_internal_message, api_not_found,
};
use crate::api::types::{DevTokenRequest, DevTokenResponse};
use crate::app::AppState;
use crate::store::StoreError;
use axum::Json;
use axum::extract::State;

#[utoipa::path(
    post,
    path = "/v1/auth/token",
    tag = "auth",
    request_body = DevTokenRequest,
    responses(
        (status = 200, description = "Token minted", body = DevTokenResponse),
        (status = 403, description = "Dev auth disabled or user inactive"),
        (status = 404, description = "Unknown user", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn issue_dev_token(
    State(state): State<AppState>,
    Json(body): Json<DevTokenRequest>,
) -> Result<Json<DevTokenResponse>, ApiError> {
    if !state.dev_auth_enabled {
        return Err(api_forbidden());
    }
    let user = match state.store.find_user_by_email(&body.email).await {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("user not found")),
        Err(err) => return Err(api_internal("failed to load user", &err)),
    };
    if !user.is_active {
        return Err(api_forbidden());
    }
    let token = state.issuer.mint(&user).map_err(|err| {
        tracing::error!(error = %err, "failed to mint dev token");
        api_internal_message("failed to mint token")
    })?;
    Ok(Json(DevTokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.token_ttl_secs,
    }))
}
