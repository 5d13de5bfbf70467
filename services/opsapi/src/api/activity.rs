//! Activity feed handler.
use crate::api::error::{ApiError, api_internal};
use crate::api::types::ActivityListResponse;
use crate::api::{authenticate, deny};
use crate::app::AppState;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use encore_rbac::{AccessQuery, Action, Resource, Workcenter, filter_by_owned_workcenter};
use serde::Deserialize;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub(crate) struct ActivityListParams {
    limit: Option<usize>,
    workcenter: Option<Workcenter>,
}

#[utoipa::path(
    get,
    path = "/v1/activity",
    tag = "activity",
    params(
        ("limit" = Option<usize>, Query, description = "Max entries, capped at 100"),
        ("workcenter" = Option<String>, Query, description = "Restrict to one workcenter")
    ),
    responses(
        (status = 200, description = "Recent activity visible to the caller", body = ActivityListResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Forbidden")
    )
)]
pub(crate) async fn list_activity(
    Query(params): Query<ActivityListParams>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ActivityListResponse>, ApiError> {
    let identity = authenticate(&state, &headers)?;
    // The feed describes task history, so task read rights gate it.
    let query = AccessQuery::new(Resource::Tasks, Action::Read);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let entries = state
        .store
        .list_activity(limit, params.workcenter)
        .await
        .map_err(|err| api_internal("failed to list activity", &err))?;
    let items = filter_by_owned_workcenter(&identity, entries);
    Ok(Json(ActivityListResponse { items }))
}
