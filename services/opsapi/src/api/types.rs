//! HTTP API request/response types.
//!
//! # Purpose
//! Defines shared payload shapes for the operations REST API and OpenAPI
//! schema generation.
use crate::model::{
    ActivityEntry, Event, EventStatus, GeoPoint, Task, TaskPriority, TaskStatus, UserRecord,
    VenueFeature,
};
use chrono::{DateTime, Utc};
use encore_common::ids::{EventId, FeatureId, UserId};
use encore_rbac::{Grant, Role, Workcenter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SystemInfo {
    pub api_version: String,
    pub storage_backend: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct EventCreateRequest {
    pub name: String,
    pub slug: String,
    pub event_type: String,
    #[serde(default)]
    pub status: Option<EventStatus>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct EventListResponse {
    pub items: Vec<Event>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TaskCreateRequest {
    #[schema(value_type = String)]
    pub event_id: EventId,
    #[schema(value_type = Option<String>)]
    pub venue_feature_id: Option<FeatureId>,
    #[schema(value_type = String)]
    pub workcenter: Workcenter,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub is_critical_path: bool,
    #[schema(value_type = Option<String>)]
    pub assigned_to: Option<UserId>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TaskListResponse {
    pub items: Vec<Task>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct VenueFeatureCreateRequest {
    #[schema(value_type = String)]
    pub event_id: EventId,
    pub feature_type: String,
    #[schema(value_type = Option<String>)]
    pub feature_category: Option<Workcenter>,
    pub name: String,
    pub code: Option<String>,
    pub location: GeoPoint,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub workcenter_access: Vec<Workcenter>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct VenueFeatureListResponse {
    pub items: Vec<VenueFeature>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserCreateRequest {
    pub email: String,
    pub name: String,
    #[schema(value_type = String)]
    pub role: Role,
    // Omitted fields inherit the role's default matrix.
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub workcenters: Option<Vec<Workcenter>>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub grants: Option<Vec<Grant>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserListResponse {
    pub items: Vec<UserRecord>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ActivityListResponse {
    pub items: Vec<ActivityEntry>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct DevTokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct DevTokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}
