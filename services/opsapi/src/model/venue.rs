//! Venue feature model.
//!
//! Features carry a `workcenter_access` visibility set; an empty set means
//! the feature is visible to every authenticated identity.
use chrono::{DateTime, Utc};
use encore_common::ids::{EventId, FeatureId};
use encore_rbac::{VisibleToWorkcenters, Workcenter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct VenueFeature {
    #[schema(value_type = String)]
    pub id: FeatureId,
    #[schema(value_type = String)]
    pub event_id: EventId,
    pub feature_type: String,
    #[schema(value_type = Option<String>)]
    pub feature_category: Option<Workcenter>,
    pub name: String,
    pub code: Option<String>,
    pub location: GeoPoint,
    pub status: FeatureStatus,
    pub completion_percent: f32,
    #[schema(value_type = Vec<String>)]
    pub workcenter_access: Vec<Workcenter>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VisibleToWorkcenters for VenueFeature {
    fn workcenter_access(&self) -> &[Workcenter] {
        &self.workcenter_access
    }
}

/// WGS84 point; the 3D map layer consumes richer geometry elsewhere.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    Pending,
    InProgress,
    Complete,
}

/// Partial update applied by `PATCH /v1/venue-features/{feature_id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct VenueFeaturePatch {
    pub feature_type: Option<String>,
    #[schema(value_type = Option<String>)]
    pub feature_category: Option<Workcenter>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub location: Option<GeoPoint>,
    pub status: Option<FeatureStatus>,
    pub completion_percent: Option<f32>,
    #[schema(value_type = Option<Vec<String>>)]
    pub workcenter_access: Option<Vec<Workcenter>>,
}
