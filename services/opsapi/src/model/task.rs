//! Task model and change payloads.
//!
//! Tasks are owned by exactly one workcenter; the owning tag drives both
//! list filtering and per-task mutation checks.
use chrono::{DateTime, Utc};
use encore_common::ids::{EventId, FeatureId, TaskId, UserId};
use encore_rbac::{OwnedByWorkcenter, Workcenter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct Task {
    #[schema(value_type = String)]
    pub id: TaskId,
    #[schema(value_type = String)]
    pub event_id: EventId,
    #[schema(value_type = Option<String>)]
    pub venue_feature_id: Option<FeatureId>,
    #[schema(value_type = String)]
    pub workcenter: Workcenter,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub is_critical_path: bool,
    #[schema(value_type = Option<String>)]
    pub assigned_to: Option<UserId>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedByWorkcenter for Task {
    fn owner_workcenter(&self) -> Option<Workcenter> {
        Some(self.workcenter)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Blocked,
    Completed,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// Partial update applied by `PATCH /v1/tasks/{task_id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct TaskPatch {
    #[schema(value_type = Option<String>)]
    pub workcenter: Option<Workcenter>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub is_critical_path: Option<bool>,
    #[schema(value_type = Option<String>)]
    pub assigned_to: Option<UserId>,
    pub due_date: Option<DateTime<Utc>>,
}
