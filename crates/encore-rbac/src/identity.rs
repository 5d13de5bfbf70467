//! The authenticated actor for one request.
//!
//! # Purpose
//! Carries the role, workcenter memberships, and explicit grants the engine
//! evaluates. Reconstructed fresh from a verified credential on every
//! request; never persisted; immutable once built.
use crate::{Grant, Role, Workcenter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Authenticated identity: one role, a set of workcenter memberships, and a
/// list of explicit grants consulted when the role does not short-circuit.
///
/// # Example
/// ```rust
/// use encore_rbac::{Identity, Role, Workcenter};
///
/// let identity = Identity::new("u-42", Role::OperationsLead)
///     .with_workcenters([Workcenter::Operations]);
/// assert!(identity.can_access_workcenter(Workcenter::Operations));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub subject: String,
    pub role: Role,
    pub workcenters: BTreeSet<Workcenter>,
    pub grants: Vec<Grant>,
}

impl Identity {
    /// Build an identity with no memberships or grants. Callers layer in
    /// `with_workcenters`/`with_grants` from claims or role defaults.
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: subject.into(),
            role,
            workcenters: BTreeSet::new(),
            grants: Vec::new(),
        }
    }

    pub fn with_workcenters(mut self, workcenters: impl IntoIterator<Item = Workcenter>) -> Self {
        self.workcenters = workcenters.into_iter().collect();
        self
    }

    pub fn with_grants(mut self, grants: Vec<Grant>) -> Self {
        self.grants = grants;
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workcenter_memberships_deduplicate() {
        let identity = Identity::new("u-1", Role::OperationsLead).with_workcenters([
            Workcenter::Operations,
            Workcenter::Production,
            Workcenter::Operations,
        ]);
        assert_eq!(identity.workcenters.len(), 2);
    }

    #[test]
    fn only_admin_role_is_admin() {
        assert!(Identity::new("root", Role::Admin).is_admin());
        assert!(!Identity::new("u-1", Role::Viewer).is_admin());
        assert!(!Identity::new("u-2", Role::FinanceLead).is_admin());
    }
}
