//! Activity feed entries recorded on task mutations.
use chrono::{DateTime, Utc};
use encore_common::ids::{ActivityId, TaskId};
use encore_rbac::{OwnedByWorkcenter, Workcenter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ActivityEntry {
    #[schema(value_type = String)]
    pub id: ActivityId,
    pub kind: ActivityKind,
    pub message: String,
    pub actor: String,
    // Entries inherit the workcenter of the record they describe; entries
    // without one are visible to admins only.
    #[schema(value_type = Option<String>)]
    pub workcenter: Option<Workcenter>,
    #[schema(value_type = Option<String>)]
    pub task_id: Option<TaskId>,
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn for_task(
        kind: ActivityKind,
        message: impl Into<String>,
        actor: impl Into<String>,
        workcenter: Workcenter,
        task_id: TaskId,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            kind,
            message: message.into(),
            actor: actor.into(),
            workcenter: Some(workcenter),
            task_id: Some(task_id),
            created_at: Utc::now(),
        }
    }
}

impl OwnedByWorkcenter for ActivityEntry {
    fn owner_workcenter(&self) -> Option<Workcenter> {
        self.workcenter
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
}
