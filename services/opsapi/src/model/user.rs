//! User account model.
use chrono::{DateTime, Utc};
use encore_common::ids::UserId;
use encore_rbac::{Grant, Role, Workcenter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserRecord {
    #[schema(value_type = String)]
    pub id: UserId,
    pub email: String,
    pub name: String,
    #[schema(value_type = String)]
    pub role: Role,
    #[schema(value_type = Vec<String>)]
    pub workcenters: Vec<Workcenter>,
    #[schema(value_type = Vec<Object>)]
    pub grants: Vec<Grant>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Build an active user with the role's default memberships and grants.
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email: email.into(),
            name: name.into(),
            role,
            workcenters: role.default_workcenters(),
            grants: role.default_grants(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update applied by `PATCH /v1/users/{user_id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub role: Option<Role>,
    #[schema(value_type = Option<Vec<String>>)]
    pub workcenters: Option<Vec<Workcenter>>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub grants: Option<Vec<Grant>>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_rbac::{Action, Resource};

    #[test]
    fn new_user_inherits_role_defaults() {
        let user = UserRecord::new("ops@encore.test", "Ops Lead", Role::OperationsLead);
        assert!(user.is_active);
        assert_eq!(user.workcenters, vec![Workcenter::Operations]);
        assert!(user.grants.contains(&Grant::scoped(
            Resource::Tasks,
            Action::Create,
            Workcenter::Operations
        )));
    }
}
