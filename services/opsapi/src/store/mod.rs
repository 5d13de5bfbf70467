use crate::model::{
    ActivityEntry, Event, EventPatch, Task, TaskPatch, UserRecord, UserPatch, VenueFeature,
    VenueFeaturePatch,
};
use async_trait::async_trait;
use encore_common::ids::{EventId, FeatureId, TaskId, UserId};
use encore_rbac::Workcenter;
use thiserror::Error;

pub mod memory;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    // Max entries retained in the activity feed.
    pub activity_retention: usize,
}

/// Persistence-side filter for task listings. Access filtering happens in
/// the caller after the rows come back.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub event_id: Option<EventId>,
    pub workcenter: Option<Workcenter>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait OpsStore: Send + Sync {
    async fn list_events(&self) -> StoreResult<Vec<Event>>;
    async fn get_event(&self, id: &EventId) -> StoreResult<Event>;
    async fn create_event(&self, event: Event) -> StoreResult<Event>;
    async fn patch_event(&self, id: &EventId, patch: EventPatch) -> StoreResult<Event>;
    async fn delete_event(&self, id: &EventId) -> StoreResult<()>;

    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>>;
    async fn get_task(&self, id: &TaskId) -> StoreResult<Task>;
    async fn create_task(&self, task: Task) -> StoreResult<Task>;
    async fn patch_task(&self, id: &TaskId, patch: TaskPatch) -> StoreResult<Task>;
    async fn delete_task(&self, id: &TaskId) -> StoreResult<()>;

    async fn list_features(&self, event_id: Option<EventId>) -> StoreResult<Vec<VenueFeature>>;
    async fn get_feature(&self, id: &FeatureId) -> StoreResult<VenueFeature>;
    async fn create_feature(&self, feature: VenueFeature) -> StoreResult<VenueFeature>;
    async fn patch_feature(
        &self,
        id: &FeatureId,
        patch: VenueFeaturePatch,
    ) -> StoreResult<VenueFeature>;
    async fn delete_feature(&self, id: &FeatureId) -> StoreResult<()>;

    async fn list_users(&self) -> StoreResult<Vec<UserRecord>>;
    async fn get_user(&self, id: &UserId) -> StoreResult<UserRecord>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<UserRecord>;
    async fn create_user(&self, user: UserRecord) -> StoreResult<UserRecord>;
    async fn patch_user(&self, id: &UserId, patch: UserPatch) -> StoreResult<UserRecord>;
    async fn delete_user(&self, id: &UserId) -> StoreResult<()>;

    async fn record_activity(&self, entry: ActivityEntry) -> StoreResult<()>;
    async fn list_activity(
        &self,
        limit: usize,
        workcenter: Option<Workcenter>,
    ) -> StoreResult<Vec<ActivityEntry>>;

    async fn health_check(&self) -> StoreResult<()>;
    fn backend_name(&self) -> &'static str;
}
