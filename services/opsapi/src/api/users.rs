//! User administration handlers, guarded by `users` grants. The default
//! role matrix gives those to admins only.
use crate::api::error::{ApiError, api_conflict, api_internal, api_not_found};
use crate::api::types::{UserCreateRequest, UserListResponse};
use crate::api::{authenticate, deny};
use crate::app::AppState;
use crate::model::{UserPatch, UserRecord};
use crate::store::StoreError;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use encore_common::ids::UserId;
use encore_rbac::{AccessQuery, Action, Resource};

fn users_query(action: Action) -> AccessQuery {
    AccessQuery::new(Resource::Users, action)
}

#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "users",
    responses(
        (status = 200, description = "List users", body = UserListResponse),
        (status = 403, description = "Forbidden")
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserListResponse>, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = users_query(Action::Read);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    let items = state
        .store
        .list_users()
        .await
        .map_err(|err| api_internal("failed to list users", &err))?;
    Ok(Json(UserListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/v1/users/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserRecord),
        (status = 404, description = "User not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_user(
    Path(user_id): Path<UserId>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserRecord>, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = users_query(Action::Read);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    match state.store.get_user(&user_id).await {
        Ok(user) => Ok(Json(user)),
        Err(StoreError::NotFound(_)) => Err(api_not_found("user not found")),
        Err(err) => Err(api_internal("failed to load user", &err)),
    }
}

#[utoipa::path(
    post,
    path = "/v1/users",
    tag = "users",
    request_body = UserCreateRequest,
    responses(
        (status = 201, description = "User created", body = UserRecord),
        (status = 409, description = "Email already exists", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UserCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = users_query(Action::Create);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    let mut user = UserRecord::new(body.email, body.name, body.role);
    // Explicit memberships/grants override the role defaults.
    if let Some(workcenters) = body.workcenters {
        user.workcenters = workcenters;
    }
    if let Some(grants) = body.grants {
        user.grants = grants;
    }
    match state.store.create_user(user).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(user))),
        Err(StoreError::Conflict(_)) => Err(api_conflict("already_exists", "email already exists")),
        Err(err) => Err(api_internal("failed to create user", &err)),
    }
}

#[utoipa::path(
    patch,
    path = "/v1/users/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "User identifier")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "User updated", body = UserRecord),
        (status = 404, description = "User not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn patch_user(
    Path(user_id): Path<UserId>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(patch): Json<UserPatch>,
) -> Result<Json<UserRecord>, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = users_query(Action::Update);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    match state.store.patch_user(&user_id, patch).await {
        Ok(user) => Ok(Json(user)),
        Err(StoreError::NotFound(_)) => Err(api_not_found("user not found")),
        Err(err) => Err(api_internal("failed to update user", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/users/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_user(
    Path(user_id): Path<UserId>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = users_query(Action::Delete);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    match state.store.delete_user(&user_id).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err(api_not_found("user not found")),
        Err(err) => Err(api_internal("failed to delete user", &err)),
    }
}
