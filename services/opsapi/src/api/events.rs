//! Event API handlers.
//!
//! Events have no per-workcenter visibility set; an `events` grant for the
//! action is the whole check. In the default role matrix only admins hold
//! event write grants.
use crate::api::error::{ApiError, api_conflict, api_internal, api_not_found};
use crate::api::types::{EventCreateRequest, EventListResponse};
use crate::api::{authenticate, deny};
use crate::app::AppState;
use crate::model::{Event, EventPatch, EventStatus};
use crate::store::StoreError;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use chrono::Utc;
use encore_common::ids::EventId;
use encore_rbac::{AccessQuery, Action, Resource};

#[utoipa::path(
    get,
    path = "/v1/events",
    tag = "events",
    responses(
        (status = 200, description = "List events", body = EventListResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Forbidden")
    )
)]
pub(crate) async fn list_events(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<EventListResponse>, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = AccessQuery::new(Resource::Events, Action::Read);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    let items = state
        .store
        .list_events()
        .await
        .map_err(|err| api_internal("failed to list events", &err))?;
    Ok(Json(EventListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/v1/events/{event_id}",
    tag = "events",
    params(("event_id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Event", body = Event),
        (status = 404, description = "Event not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_event(
    Path(event_id): Path<EventId>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Event>, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = AccessQuery::new(Resource::Events, Action::Read);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    match state.store.get_event(&event_id).await {
        Ok(event) => Ok(Json(event)),
        Err(StoreError::NotFound(_)) => Err(api_not_found("event not found")),
        Err(err) => Err(api_internal("failed to load event", &err)),
    }
}

#[utoipa::path(
    post,
    path = "/v1/events",
    tag = "events",
    request_body = EventCreateRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 409, description = "Slug already exists", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<EventCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = AccessQuery::new(Resource::Events, Action::Create);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    let now = Utc::now();
    let event = Event {
        id: EventId::new(),
        name: body.name,
        slug: body.slug,
        event_type: body.event_type,
        status: body.status.unwrap_or(EventStatus::Planning),
        starts_at: body.starts_at,
        ends_at: body.ends_at,
        created_at: now,
        updated_at: now,
    };
    match state.store.create_event(event).await {
        Ok(event) => Ok((StatusCode::CREATED, Json(event))),
        Err(StoreError::Conflict(_)) => Err(api_conflict("already_exists", "slug already exists")),
        Err(err) => Err(api_internal("failed to create event", &err)),
    }
}

#[utoipa::path(
    patch,
    path = "/v1/events/{event_id}",
    tag = "events",
    params(("event_id" = String, Path, description = "Event identifier")),
    request_body = EventPatch,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 404, description = "Event not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn patch_event(
    Path(event_id): Path<EventId>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(patch): Json<EventPatch>,
) -> Result<Json<Event>, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = AccessQuery::new(Resource::Events, Action::Update);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    match state.store.patch_event(&event_id, patch).await {
        Ok(event) => Ok(Json(event)),
        Err(StoreError::NotFound(_)) => Err(api_not_found("event not found")),
        Err(err) => Err(api_internal("failed to update event", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/events/{event_id}",
    tag = "events",
    params(("event_id" = String, Path, description = "Event identifier")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_event(
    Path(event_id): Path<EventId>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = AccessQuery::new(Resource::Events, Action::Delete);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    match state.store.delete_event(&event_id).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err(api_not_found("event not found")),
        Err(err) => Err(api_internal("failed to delete event", &err)),
    }
}
