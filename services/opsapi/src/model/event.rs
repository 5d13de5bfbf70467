//! Festival event model.
use chrono::{DateTime, Utc};
use encore_common::ids::EventId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Event {
    #[schema(value_type = String)]
    pub id: EventId,
    pub name: String,
    pub slug: String,
    pub event_type: String,
    pub status: EventStatus,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Planning,
    Active,
    Completed,
    Archived,
}

/// Partial update applied by `PATCH /v1/events/{event_id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub event_type: Option<String>,
    pub status: Option<EventStatus>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}
