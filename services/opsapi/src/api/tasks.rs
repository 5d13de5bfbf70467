//! Task API handlers.
//!
//! Every handler authenticates, consults the access engine, and only then
//! touches the store. List results are narrowed with the owned-workcenter
//! filter before leaving the service; single-task lookups check the owning
//! workcenter directly. Mutations append activity-feed entries.
use crate::api::error::{ApiError, api_internal, api_not_found};
use crate::api::types::{TaskCreateRequest, TaskListResponse};
use crate::api::{authenticate, deny};
use crate::app::AppState;
use crate::model::{ActivityEntry, ActivityKind, Task, TaskPatch, TaskPriority, TaskStatus};
use crate::store::{StoreError, TaskFilter};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use chrono::Utc;
use encore_common::ids::TaskId;
use encore_rbac::{AccessQuery, Action, Resource, Workcenter, filter_by_owned_workcenter};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TaskListParams {
    event_id: Option<encore_common::ids::EventId>,
    workcenter: Option<Workcenter>,
}

#[utoipa::path(
    get,
    path = "/v1/tasks",
    tag = "tasks",
    params(
        ("event_id" = Option<String>, Query, description = "Restrict to one event"),
        ("workcenter" = Option<String>, Query, description = "Restrict to one workcenter")
    ),
    responses(
        (status = 200, description = "Tasks visible to the caller", body = TaskListResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Forbidden")
    )
)]
pub(crate) async fn list_tasks(
    Query(params): Query<TaskListParams>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TaskListResponse>, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = AccessQuery::new(Resource::Tasks, Action::Read);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    let filter = TaskFilter {
        event_id: params.event_id,
        workcenter: params.workcenter,
    };
    let tasks = state
        .store
        .list_tasks(&filter)
        .await
        .map_err(|err| api_internal("failed to list tasks", &err))?;
    let items = filter_by_owned_workcenter(&identity, tasks);
    Ok(Json(TaskListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/v1/tasks/{task_id}",
    tag = "tasks",
    params(("task_id" = String, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task", body = Task),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Task not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_task(
    Path(task_id): Path<TaskId>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Task>, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let query = AccessQuery::new(Resource::Tasks, Action::Read);
    if !identity.is_allowed(&query) {
        return Err(deny(&identity, &query));
    }
    let task = match state.store.get_task(&task_id).await {
        Ok(task) => task,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("task not found")),
        Err(err) => return Err(api_internal("failed to load task", &err)),
    };
    if !identity.can_access_workcenter(task.workcenter) {
        return Err(deny(
            &identity,
            &AccessQuery::scoped(Resource::Tasks, Action::Read, task.workcenter),
        ));
    }
    Ok(Json(task))
}

#[utoipa::path(
    post,
    path = "/v1/tasks",
    tag = "tasks",
    request_body = TaskCreateRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Event not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<TaskCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = authenticate(&state, &headers)?;
    if !identity.can_create_task_in_workcenter(body.workcenter) {
        return Err(deny(
            &identity,
            &AccessQuery::scoped(Resource::Tasks, Action::Create, body.workcenter),
        ));
    }
    let now = Utc::now();
    let task = Task {
        id: TaskId::new(),
        event_id: body.event_id,
        venue_feature_id: body.venue_feature_id,
        workcenter: body.workcenter,
        title: body.title,
        description: body.description,
        status: body.status.unwrap_or(TaskStatus::Pending),
        priority: body.priority.unwrap_or(TaskPriority::Medium),
        is_critical_path: body.is_critical_path,
        assigned_to: body.assigned_to,
        due_date: body.due_date,
        completed_at: None,
        created_by: identity.subject.parse().ok(),
        created_at: now,
        updated_at: now,
    };
    let task = match state.store.create_task(task).await {
        Ok(task) => task,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("event not found")),
        Err(err) => return Err(api_internal("failed to create task", &err)),
    };
    record_task_activity(
        &state,
        ActivityKind::TaskCreated,
        format!("created task \"{}\"", task.title),
        &identity.subject,
        &task,
    )
    .await;
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    patch,
    path = "/v1/tasks/{task_id}",
    tag = "tasks",
    params(("task_id" = String, Path, description = "Task identifier")),
    request_body = TaskPatch,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Task not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn patch_task(
    Path(task_id): Path<TaskId>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let existing = match state.store.get_task(&task_id).await {
        Ok(task) => task,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("task not found")),
        Err(err) => return Err(api_internal("failed to load task", &err)),
    };
    if !identity.can_update_task(existing.workcenter) {
        return Err(deny(
            &identity,
            &AccessQuery::scoped(Resource::Tasks, Action::Update, existing.workcenter),
        ));
    }
    // Moving a task between workcenters needs update rights on both sides.
    if let Some(target) = patch.workcenter
        && target != existing.workcenter
        && !identity.can_update_task(target)
    {
        return Err(deny(
            &identity,
            &AccessQuery::scoped(Resource::Tasks, Action::Update, target),
        ));
    }
    let task = match state.store.patch_task(&task_id, patch).await {
        Ok(task) => task,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("task not found")),
        Err(err) => return Err(api_internal("failed to update task", &err)),
    };
    record_task_activity(
        &state,
        ActivityKind::TaskUpdated,
        format!("updated task \"{}\"", task.title),
        &identity.subject,
        &task,
    )
    .await;
    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/v1/tasks/{task_id}",
    tag = "tasks",
    params(("task_id" = String, Path, description = "Task identifier")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Task not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_task(
    Path(task_id): Path<TaskId>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let identity = authenticate(&state, &headers)?;
    let existing = match state.store.get_task(&task_id).await {
        Ok(task) => task,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("task not found")),
        Err(err) => return Err(api_internal("failed to load task", &err)),
    };
    if !identity.can_delete_task(existing.workcenter) {
        return Err(deny(
            &identity,
            &AccessQuery::scoped(Resource::Tasks, Action::Delete, existing.workcenter),
        ));
    }
    match state.store.delete_task(&task_id).await {
        Ok(_) => {
            record_task_activity(
                &state,
                ActivityKind::TaskDeleted,
                format!("deleted task \"{}\"", existing.title),
                &identity.subject,
                &existing,
            )
            .await;
            Ok(StatusCode::NO_CONTENT)
        }
        Err(StoreError::NotFound(_)) => Err(api_not_found("task not found")),
        Err(err) => Err(api_internal("failed to delete task", &err)),
    }
}

// Feed failures must not fail the mutation that already happened.
async fn record_task_activity(
    state: &AppState,
    kind: ActivityKind,
    message: String,
    actor: &str,
    task: &Task,
) {
    let entry = ActivityEntry::for_task(kind, message, actor, task.workcenter, task.id);
    if let Err(err) = state.store.record_activity(entry).await {
        tracing::warn!(error = ?err, "failed to record activity entry");
    }
}
