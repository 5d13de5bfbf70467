//! In-memory implementation of the operations store.
//!
//! # Purpose
//! Implements the `OpsStore` trait entirely in memory using `HashMap`s
//! guarded by `tokio::sync::RwLock`. It exists for:
//! - local development and tests (no external dependencies)
//! - deployments where durability is not required
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - **Single-process consistency**: write locks for mutations, read locks
//!   for reads.
//!
//! # Activity feed
//! The feed is a bounded in-memory log with a fixed retention window
//! (`StoreConfig::activity_retention`). When the window overflows, the
//! oldest entries are evicted.
//!
//! # Performance characteristics
//! - Reads are cheap and concurrent (many readers).
//! - Listing sorts by creation time to keep responses deterministic.
//! - Deletes cascade by scanning dependents; acceptable for in-memory dev
//!   workloads.
use super::{OpsStore, StoreConfig, StoreError, StoreResult, TaskFilter};
use crate::model::{
    ActivityEntry, Event, EventPatch, Task, TaskPatch, TaskStatus, UserPatch, UserRecord,
    VenueFeature, VenueFeaturePatch,
};
use async_trait::async_trait;
use chrono::Utc;
use encore_common::ids::{EventId, FeatureId, TaskId, UserId};
use encore_rbac::Workcenter;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Bounded, append-only activity log.
///
/// `record()` appends and evicts the oldest entries once the configured
/// capacity is exceeded; `recent()` walks newest-first.
#[derive(Debug)]
struct ActivityLog {
    capacity: usize,
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    fn record(&mut self, entry: ActivityEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    fn recent(&self, limit: usize, workcenter: Option<Workcenter>) -> Vec<ActivityEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|entry| workcenter.is_none() || entry.workcenter == workcenter)
            .take(limit)
            .cloned()
            .collect()
    }
}

/// In-memory operations store.
///
/// All maps are wrapped in `Arc<RwLock<...>>` so the store can be shared
/// across async request handlers with concurrent reads and serialized
/// writes. Deleting an event removes its dependent tasks and features by
/// scanning; durable backends would use SQL cascades instead.
pub struct InMemoryStore {
    events: Arc<RwLock<HashMap<EventId, Event>>>,
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
    features: Arc<RwLock<HashMap<FeatureId, VenueFeature>>>,
    users: Arc<RwLock<HashMap<UserId, UserRecord>>>,
    activity: Arc<RwLock<ActivityLog>>,
}

impl InMemoryStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            events: Arc::new(RwLock::new(HashMap::new())),
            tasks: Arc::new(RwLock::new(HashMap::new())),
            features: Arc::new(RwLock::new(HashMap::new())),
            users: Arc::new(RwLock::new(HashMap::new())),
            activity: Arc::new(RwLock::new(ActivityLog::new(config.activity_retention))),
        }
    }
}

// Deterministic listing order: oldest first, id as tie-breaker.
fn sorted_by_creation<T>(mut items: Vec<T>, key: impl Fn(&T) -> (chrono::DateTime<Utc>, String)) -> Vec<T> {
    items.sort_by_key(|item| key(item));
    items
}

#[async_trait]
impl OpsStore for InMemoryStore {
    async fn list_events(&self) -> StoreResult<Vec<Event>> {
        let events = self.events.read().await.values().cloned().collect();
        Ok(sorted_by_creation(events, |event| {
            (event.created_at, event.id.to_string())
        }))
    }

    async fn get_event(&self, id: &EventId) -> StoreResult<Event> {
        self.events
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("event {id}")))
    }

    async fn create_event(&self, event: Event) -> StoreResult<Event> {
        let mut events = self.events.write().await;
        if events.values().any(|existing| existing.slug == event.slug) {
            return Err(StoreError::Conflict(format!("event slug {}", event.slug)));
        }
        events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn patch_event(&self, id: &EventId, patch: EventPatch) -> StoreResult<Event> {
        let mut events = self.events.write().await;
        let event = events
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("event {id}")))?;
        if let Some(name) = patch.name {
            event.name = name;
        }
        if let Some(event_type) = patch.event_type {
            event.event_type = event_type;
        }
        if let Some(status) = patch.status {
            event.status = status;
        }
        if let Some(starts_at) = patch.starts_at {
            event.starts_at = starts_at;
        }
        if let Some(ends_at) = patch.ends_at {
            event.ends_at = ends_at;
        }
        event.updated_at = Utc::now();
        Ok(event.clone())
    }

    async fn delete_event(&self, id: &EventId) -> StoreResult<()> {
        let mut events = self.events.write().await;
        if events.remove(id).is_none() {
            return Err(StoreError::NotFound(format!("event {id}")));
        }
        // Cascade to dependents.
        self.tasks
            .write()
            .await
            .retain(|_, task| task.event_id != *id);
        self.features
            .write()
            .await
            .retain(|_, feature| feature.event_id != *id);
        Ok(())
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let tasks: Vec<Task> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|task| {
                filter
                    .event_id
                    .is_none_or(|event_id| task.event_id == event_id)
                    && filter
                        .workcenter
                        .is_none_or(|workcenter| task.workcenter == workcenter)
            })
            .cloned()
            .collect();
        Ok(sorted_by_creation(tasks, |task| {
            (task.created_at, task.id.to_string())
        }))
    }

    async fn get_task(&self, id: &TaskId) -> StoreResult<Task> {
        self.tasks
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("task {id}")))
    }

    async fn create_task(&self, task: Task) -> StoreResult<Task> {
        if !self.events.read().await.contains_key(&task.event_id) {
            return Err(StoreError::NotFound(format!("event {}", task.event_id)));
        }
        self.tasks.write().await.insert(task.id, task.clone());
        metrics::counter!("opsapi_tasks_created_total").increment(1);
        Ok(task)
    }

    async fn patch_task(&self, id: &TaskId, patch: TaskPatch) -> StoreResult<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("task {id}")))?;
        if let Some(workcenter) = patch.workcenter {
            task.workcenter = workcenter;
        }
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(status) = patch.status {
            // Stamp completion the first time a task reaches Completed.
            if status == TaskStatus::Completed && task.status != TaskStatus::Completed {
                task.completed_at = Some(Utc::now());
            }
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(is_critical_path) = patch.is_critical_path {
            task.is_critical_path = is_critical_path;
        }
        if let Some(assigned_to) = patch.assigned_to {
            task.assigned_to = Some(assigned_to);
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        task.updated_at = Utc::now();
        metrics::counter!("opsapi_tasks_updated_total").increment(1);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &TaskId) -> StoreResult<()> {
        if self.tasks.write().await.remove(id).is_none() {
            return Err(StoreError::NotFound(format!("task {id}")));
        }
        metrics::counter!("opsapi_tasks_deleted_total").increment(1);
        Ok(())
    }

    async fn list_features(&self, event_id: Option<EventId>) -> StoreResult<Vec<VenueFeature>> {
        let features: Vec<VenueFeature> = self
            .features
            .read()
            .await
            .values()
            .filter(|feature| event_id.is_none_or(|event_id| feature.event_id == event_id))
            .cloned()
            .collect();
        Ok(sorted_by_creation(features, |feature| {
            (feature.created_at, feature.id.to_string())
        }))
    }

    async fn get_feature(&self, id: &FeatureId) -> StoreResult<VenueFeature> {
        self.features
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("venue feature {id}")))
    }

    async fn create_feature(&self, feature: VenueFeature) -> StoreResult<VenueFeature> {
        if !self.events.read().await.contains_key(&feature.event_id) {
            return Err(StoreError::NotFound(format!("event {}", feature.event_id)));
        }
        self.features
            .write()
            .await
            .insert(feature.id, feature.clone());
        Ok(feature)
    }

    async fn patch_feature(
        &self,
        id: &FeatureId,
        patch: VenueFeaturePatch,
    ) -> StoreResult<VenueFeature> {
        let mut features = self.features.write().await;
        let feature = features
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("venue feature {id}")))?;
        if let Some(feature_type) = patch.feature_type {
            feature.feature_type = feature_type;
        }
        if let Some(feature_category) = patch.feature_category {
            feature.feature_category = Some(feature_category);
        }
        if let Some(name) = patch.name {
            feature.name = name;
        }
        if let Some(code) = patch.code {
            feature.code = Some(code);
        }
        if let Some(location) = patch.location {
            feature.location = location;
        }
        if let Some(status) = patch.status {
            feature.status = status;
        }
        if let Some(completion_percent) = patch.completion_percent {
            feature.completion_percent = completion_percent;
        }
        if let Some(workcenter_access) = patch.workcenter_access {
            feature.workcenter_access = workcenter_access;
        }
        feature.updated_at = Utc::now();
        Ok(feature.clone())
    }

    async fn delete_feature(&self, id: &FeatureId) -> StoreResult<()> {
        if self.features.write().await.remove(id).is_none() {
            return Err(StoreError::NotFound(format!("venue feature {id}")));
        }
        Ok(())
    }

    async fn list_users(&self) -> StoreResult<Vec<UserRecord>> {
        let users = self.users.read().await.values().cloned().collect();
        Ok(sorted_by_creation(users, |user| {
            (user.created_at, user.id.to_string())
        }))
    }

    async fn get_user(&self, id: &UserId) -> StoreResult<UserRecord> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("user {id}")))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<UserRecord> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("user {email}")))
    }

    async fn create_user(&self, user: UserRecord) -> StoreResult<UserRecord> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::Conflict(format!("user email {}", user.email)));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn patch_user(&self, id: &UserId, patch: UserPatch) -> StoreResult<UserRecord> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("user {id}")))?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(workcenters) = patch.workcenters {
            user.workcenters = workcenters;
        }
        if let Some(grants) = patch.grants {
            user.grants = grants;
        }
        if let Some(is_active) = patch.is_active {
            user.is_active = is_active;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &UserId) -> StoreResult<()> {
        if self.users.write().await.remove(id).is_none() {
            return Err(StoreError::NotFound(format!("user {id}")));
        }
        Ok(())
    }

    async fn record_activity(&self, entry: ActivityEntry) -> StoreResult<()> {
        self.activity.write().await.record(entry);
        Ok(())
    }

    async fn list_activity(
        &self,
        limit: usize,
        workcenter: Option<Workcenter>,
    ) -> StoreResult<Vec<ActivityEntry>> {
        Ok(self.activity.read().await.recent(limit, workcenter))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActivityKind, EventStatus, GeoPoint, TaskPriority};
    use chrono::Duration;

    fn store() -> InMemoryStore {
        InMemoryStore::new(StoreConfig {
            activity_retention: 3,
        })
    }

    fn sample_event() -> Event {
        let now = Utc::now();
        Event {
            id: EventId::new(),
            name: "Mainstage Festival".to_string(),
            slug: "mainstage".to_string(),
            event_type: "festival".to_string(),
            status: EventStatus::Planning,
            starts_at: now,
            ends_at: now + Duration::days(3),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_task(event_id: EventId, workcenter: Workcenter) -> Task {
        let now = Utc::now();
        Task {
            id: TaskId::new(),
            event_id,
            venue_feature_id: None,
            workcenter,
            title: "Rig the PA".to_string(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            is_critical_path: false,
            assigned_to: None,
            due_date: None,
            completed_at: None,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_feature(event_id: EventId) -> VenueFeature {
        let now = Utc::now();
        VenueFeature {
            id: FeatureId::new(),
            event_id,
            feature_type: "stage".to_string(),
            feature_category: Some(Workcenter::Production),
            name: "Main Stage".to_string(),
            code: Some("MS-1".to_string()),
            location: GeoPoint { lat: 0.0, lon: 0.0 },
            status: crate::model::FeatureStatus::Pending,
            completion_percent: 0.0,
            workcenter_access: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn event_slug_conflict() {
        let store = store();
        let event = sample_event();
        store.create_event(event.clone()).await.expect("create");
        let mut duplicate = sample_event();
        duplicate.id = EventId::new();
        let err = store.create_event(duplicate).await.expect_err("conflict");
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn task_requires_existing_event() {
        let store = store();
        let task = sample_task(EventId::new(), Workcenter::Operations);
        let err = store.create_task(task).await.expect_err("missing event");
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_event_cascades_to_dependents() {
        let store = store();
        let event = store.create_event(sample_event()).await.expect("event");
        store
            .create_task(sample_task(event.id, Workcenter::Operations))
            .await
            .expect("task");
        store
            .create_feature(sample_feature(event.id))
            .await
            .expect("feature");

        store.delete_event(&event.id).await.expect("delete");
        assert!(
            store
                .list_tasks(&TaskFilter::default())
                .await
                .expect("tasks")
                .is_empty()
        );
        assert!(store.list_features(None).await.expect("features").is_empty());
    }

    #[tokio::test]
    async fn completing_a_task_stamps_completed_at() {
        let store = store();
        let event = store.create_event(sample_event()).await.expect("event");
        let task = store
            .create_task(sample_task(event.id, Workcenter::Production))
            .await
            .expect("task");

        let patched = store
            .patch_task(
                &task.id,
                TaskPatch {
                    status: Some(TaskStatus::Completed),
                    ..TaskPatch::default()
                },
            )
            .await
            .expect("patch");
        assert!(patched.completed_at.is_some());
    }

    #[tokio::test]
    async fn activity_log_is_bounded_and_newest_first() {
        let store = store();
        let event = store.create_event(sample_event()).await.expect("event");
        for index in 0..5 {
            let task = store
                .create_task(sample_task(event.id, Workcenter::Operations))
                .await
                .expect("task");
            store
                .record_activity(ActivityEntry::for_task(
                    ActivityKind::TaskCreated,
                    format!("created task {index}"),
                    "tester",
                    Workcenter::Operations,
                    task.id,
                ))
                .await
                .expect("activity");
        }

        // Retention window is 3; only the newest three survive.
        let entries = store.list_activity(10, None).await.expect("activity");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "created task 4");
        assert_eq!(entries[2].message, "created task 2");

        let filtered = store
            .list_activity(10, Some(Workcenter::Security))
            .await
            .expect("activity");
        assert!(filtered.is_empty());
    }

    #[tokio::test]
    async fn user_email_conflict_and_lookup() {
        let store = store();
        let user = UserRecord::new("ops@encore.test", "Ops", encore_rbac::Role::OperationsLead);
        store.create_user(user.clone()).await.expect("create");

        let found = store
            .find_user_by_email("ops@encore.test")
            .await
            .expect("find");
        assert_eq!(found.id, user.id);

        let duplicate = UserRecord::new("ops@encore.test", "Dup", encore_rbac::Role::Viewer);
        let err = store.create_user(duplicate).await.expect_err("conflict");
        assert!(matches!(err, StoreError::Conflict(_)));
    }
}
