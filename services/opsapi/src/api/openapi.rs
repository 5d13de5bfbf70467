//! OpenAPI document for the operations API.
use crate::api::types;
use crate::model;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::system::system_info,
        crate::api::system::system_health,
        crate::api::events::list_events,
        crate::api::events::get_event,
        crate::api::events::create_event,
        crate::api::events::patch_event,
        crate::api::events::delete_event,
        crate::api::tasks::list_tasks,
        crate::api::tasks::get_task,
        crate::api::tasks::create_task,
        crate::api::tasks::patch_task,
        crate::api::tasks::delete_task,
        crate::api::venues::list_features,
        crate::api::venues::get_feature,
        crate::api::venues::create_feature,
        crate::api::venues::patch_feature,
        crate::api::venues::delete_feature,
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::patch_user,
        crate::api::users::delete_user,
        crate::api::activity::list_activity,
        crate::auth::dev::issue_dev_token,
    ),
    components(schemas(
        types::SystemInfo,
        types::HealthStatus,
        types::ErrorResponse,
        types::EventCreateRequest,
        types::EventListResponse,
        types::TaskCreateRequest,
        types::TaskListResponse,
        types::VenueFeatureCreateRequest,
        types::VenueFeatureListResponse,
        types::UserCreateRequest,
        types::UserListResponse,
        types::ActivityListResponse,
        types::DevTokenRequest,
        types::DevTokenResponse,
        model::Event,
        model::EventPatch,
        model::EventStatus,
        model::Task,
        model::TaskPatch,
        model::TaskStatus,
        model::TaskPriority,
        model::VenueFeature,
        model::VenueFeaturePatch,
        model::FeatureStatus,
        model::GeoPoint,
        model::UserRecord,
        model::UserPatch,
        model::ActivityEntry,
        model::ActivityKind,
    )),
    tags(
        (name = "system", description = "Service info and health"),
        (name = "auth", description = "Development token minting"),
        (name = "events", description = "Festival events"),
        (name = "tasks", description = "Workcenter tasks"),
        (name = "venue-features", description = "Venue map features"),
        (name = "users", description = "User administration"),
        (name = "activity", description = "Activity feed")
    )
)]
pub struct ApiDoc;
