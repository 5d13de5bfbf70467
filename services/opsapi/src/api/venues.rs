//! Venue feature API handlers.
//!
//! Features carry a visibility set rather than a single owner: lists are
//! narrowed with the workcenter-access filter and single lookups use the
//! per-record visibility check. Writes are scoped by the feature's
//! category workcenter when it has one.
use crate::api::error::{ApiError, api_internal, api_not_found};
use crate::api::types::{VenueFeatureCreateRequest, VenueFeatureListResponse};
use crate::api::{authenticate, deny};
use crate::app::AppState;
use crate::model::{FeatureStatus, VenueFeature, VenueFeaturePatch};
use crate::store::StoreError;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use chrono::Utc;
use encore_common::ids::{EventId, FeatureId};
use encore_rbac::{
    AccessQuery, Action, Identity, Resource, Workcenter, filter_by_workcenter_access,
    is_visible_to,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureListParams {
    event_id: Option<EventId>,
}

// Category-scoped when the feature names one, unscoped otherwise.
fn feature_write_allowed(
    identity: &Identity,
    action: Action,
    category: Option<Workcenter>,
) -> Result<(), ApiError> {
    let query = match category {
        Some(workcenter) => AccessQuery::scoped(Resource::VenueFeatures, action, workcenter),
        None => AccessQuery::new(Resource::VenueFeatures, action),
    };
    let allowed = match category {
        Some(workcenter) => {
            identity.can_access_scoped_resource(Resource::VenueFeatures, action, workcenter)
        }
        None => identity.is_allowed(&query),
    };
    if allowed {
        Ok(())
    } else {
        Err(deny(identity, &query))
    }
}

#[utoipa::path(
    get,
    path = "/v1/venue-features",
    tag = "venue-features",
    params(("event_id" = Option<String>, Query, description = "Restrict to one event")),
    responses(
        (status = 200, description = "Features visible to the caller", body = VenueFeatureListResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Forbidden")
    )
)]
pub(crate) async fn list_features(
    Query(params): Query<FeatureListParams>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<VenueFeatureListResponse>, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = AccessQuery::new(Resource::VenueFeatures, Action::Read);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    let features = state
        .store
        .list_features(params.event_id)
        .await
        .map_err(|err| api_internal("failed to list venue features", &err))?;
    let items = filter_by_workcenter_access(&identity, features);
    Ok(Json(VenueFeatureListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/v1/venue-features/{feature_id}",
    tag = "venue-features",
    params(("feature_id" = String, Path, description = "Feature identifier")),
    responses(
        (status = 200, description = "Venue feature", body = VenueFeature),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Feature not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_feature(
    Path(feature_id): Path<FeatureId>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<VenueFeature>, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = AccessQuery::new(Resource::VenueFeatures, Action::Read);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    let feature = match state.store.get_feature(&feature_id).await {
        Ok(feature) => feature,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("venue feature not found")),
        Err(err) => return Err(api_internal("failed to load venue feature", &err)),
    };
    if !is_visible_to(&identity, &feature) {
        return Err(deny(&identity, &query));
    }
    Ok(Json(feature))
}

#[utoipa::path(
    post,
    path = "/v1/venue-features",
    tag = "venue-features",
    request_body = VenueFeatureCreateRequest,
    responses(
        (status = 201, description = "Feature created", body = VenueFeature),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Event not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_feature(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<VenueFeatureCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = authenticate(&state, &headers)?;
    feature_write_allowed(&identity, Action::Create, body.feature_category)?;
    let now = Utc::now();
    let feature = VenueFeature {
        id: FeatureId::new(),
        event_id: body.event_id,
        feature_type: body.feature_type,
        feature_category: body.feature_category,
        name: body.name,
        code: body.code,
        location: body.location,
        status: FeatureStatus::Pending,
        completion_percent: 0.0,
        workcenter_access: body.workcenter_access,
        created_at: now,
        updated_at: now,
    };
    match state.store.create_feature(feature).await {
        Ok(feature) => Ok((StatusCode::CREATED, Json(feature))),
        Err(StoreError::NotFound(_)) => Err(api_not_found("event not found")),
        Err(err) => Err(api_internal("failed to create venue feature", &err)),
    }
}

#[utoipa::path(
    patch,
    path = "/v1/venue-features/{feature_id}",
    tag = "venue-features",
    params(("feature_id" = String, Path, description = "Feature identifier")),
    request_body = VenueFeaturePatch,
    responses(
        (status = 200, description = "Feature updated", body = VenueFeature),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Feature not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn patch_feature(
    Path(feature_id): Path<FeatureId>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(patch): Json<VenueFeaturePatch>,
) -> Result<Json<VenueFeature>, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let existing = match state.store.get_feature(&feature_id).await {
        Ok(feature) => feature,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("venue feature not found")),
        Err(err) => return Err(api_internal("failed to load venue feature", &err)),
    };
    if !is_visible_to(&identity, &existing) {
        return Err(deny(
            &identity,
            &AccessQuery::new(Resource::VenueFeatures, Action::Update),
        ));
    }
    feature_write_allowed(&identity, Action::Update, existing.feature_category)?;
    match state.store.patch_feature(&feature_id, patch).await {
        Ok(feature) => Ok(Json(feature)),
        Err(StoreError::NotFound(_)) => Err(api_not_found("venue feature not found")),
        Err(err) => Err(api_internal("failed to update venue feature", &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/venue-features/{feature_id}",
    tag = "venue-features",
    params(("feature_id" = String, Path, description = "Feature identifier")),
    responses(
        (status = 204, description = "Feature deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Feature not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_feature(
    Path(feature_id): Path<FeatureId>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let existing = match state.store.get_feature(&feature_id).await {
        Ok(feature) => feature,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("venue feature not found")),
        Err(err) => return Err(api_internal("failed to load venue feature", &err)),
    };
    if !is_visible_to(&identity, &existing) {
        return Err(deny(
            &identity,
            &AccessQuery::new(Resource::VenueFeatures, Action::Delete),
        ));
    }
    feature_write_allowed(&identity, Action::Delete, existing.feature_category)?;
    match state.store.delete_feature(&feature_id).await {
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err(api_not_found("venue feature not found")),
        Err(err) => Err(api_internal("failed to delete venue feature", &err)),
    }
}
