//! Access decisions and record filtering.
//!
//! # Purpose
//! Implements the decision operations on [`Identity`] and the two filtering
//! operations applied to query results before they reach a client.
//!
//! # Key invariants
//! - Admin bypass is step one of every operation.
//! - Filters are stable: output preserves input order and is a subset of
//!   the input.
//! - Everything here is a total function; denial is a normal `false`, not
//!   an error.
use crate::{AccessQuery, Action, Identity, Resource, Workcenter};

impl Identity {
    /// Decide whether this identity may perform the queried action.
    ///
    /// Admin passes unconditionally. Otherwise the grant list is scanned
    /// for a matching resource/action pair; when the query names a
    /// workcenter, only grants scoped to that workcenter or unscoped
    /// grants satisfy it. A grant scoped to a different workcenter does
    /// not.
    pub fn is_allowed(&self, query: &AccessQuery) -> bool {
        if self.is_admin() {
            return true;
        }

        self.grants.iter().any(|grant| {
            if grant.resource != query.resource || grant.action != query.action {
                return false;
            }
            match query.workcenter {
                // Unscoped queries are satisfied by any matching grant.
                None => true,
                Some(requested) => {
                    grant.workcenter.is_none() || grant.workcenter == Some(requested)
                }
            }
        })
    }

    /// Coarse membership check used as a pre-filter before per-action
    /// checks.
    pub fn can_access_workcenter(&self, workcenter: Workcenter) -> bool {
        self.is_admin() || self.workcenters.contains(&workcenter)
    }

    /// Both membership and a matching grant are required; membership alone
    /// is never sufficient.
    pub fn can_access_scoped_resource(
        &self,
        resource: Resource,
        action: Action,
        workcenter: Workcenter,
    ) -> bool {
        self.can_access_workcenter(workcenter)
            && self.is_allowed(&AccessQuery::scoped(resource, action, workcenter))
    }

    pub fn can_create_task_in_workcenter(&self, workcenter: Workcenter) -> bool {
        self.can_access_scoped_resource(Resource::Tasks, Action::Create, workcenter)
    }

    pub fn can_update_task(&self, owner_workcenter: Workcenter) -> bool {
        self.can_access_scoped_resource(Resource::Tasks, Action::Update, owner_workcenter)
    }

    pub fn can_delete_task(&self, owner_workcenter: Workcenter) -> bool {
        self.can_access_scoped_resource(Resource::Tasks, Action::Delete, owner_workcenter)
    }
}

/// Records visible to a set of workcenters, where an empty set means
/// visible to everyone.
pub trait VisibleToWorkcenters {
    fn workcenter_access(&self) -> &[Workcenter];
}

/// Records owned by exactly one workcenter. `None` means the owner is
/// unknown; such records are withheld from non-admins.
pub trait OwnedByWorkcenter {
    fn owner_workcenter(&self) -> Option<Workcenter>;
}

/// Per-record form of [`filter_by_workcenter_access`], for single-record
/// lookups. An empty `workcenter_access` set is unrestricted; a non-empty
/// set must intersect the identity's memberships.
pub fn is_visible_to<T: VisibleToWorkcenters>(identity: &Identity, record: &T) -> bool {
    if identity.is_admin() {
        return true;
    }
    let access = record.workcenter_access();
    access.is_empty()
        || access
            .iter()
            .any(|workcenter| identity.workcenters.contains(workcenter))
}

/// Keep the records the identity may see through their visibility sets.
///
/// A record with an empty `workcenter_access` set is unrestricted; one with
/// a non-empty set is kept only when it intersects the identity's
/// memberships. Admin sees the input unchanged.
pub fn filter_by_workcenter_access<T: VisibleToWorkcenters>(
    identity: &Identity,
    records: Vec<T>,
) -> Vec<T> {
    if identity.is_admin() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| is_visible_to(identity, record))
        .collect()
}

/// Keep the records whose owning workcenter the identity belongs to.
///
/// Records with no owning workcenter are withheld from non-admins: an
/// ambiguous owner must not leak unrestricted data. Admin sees the input
/// unchanged.
pub fn filter_by_owned_workcenter<T: OwnedByWorkcenter>(
    identity: &Identity,
    records: Vec<T>,
) -> Vec<T> {
    if identity.is_admin() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| {
            record
                .owner_workcenter()
                .is_some_and(|workcenter| identity.workcenters.contains(&workcenter))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grant, Role};

    fn admin() -> Identity {
        Identity::new("root", Role::Admin)
    }

    fn viewer() -> Identity {
        Identity::new("viewer", Role::Viewer).with_grants(Role::Viewer.default_grants())
    }

    fn production_lead() -> Identity {
        Identity::new("prod-lead", Role::ProductionLead)
            .with_workcenters([Workcenter::Production])
            .with_grants(vec![Grant::scoped(
                Resource::Tasks,
                Action::Update,
                Workcenter::Production,
            )])
    }

    #[derive(Debug, PartialEq, Clone)]
    struct VisibleRecord {
        name: &'static str,
        access: Vec<Workcenter>,
    }

    impl VisibleToWorkcenters for VisibleRecord {
        fn workcenter_access(&self) -> &[Workcenter] {
            &self.access
        }
    }

    #[derive(Debug, PartialEq, Clone)]
    struct OwnedRecord {
        name: &'static str,
        workcenter: Option<Workcenter>,
    }

    impl OwnedByWorkcenter for OwnedRecord {
        fn owner_workcenter(&self) -> Option<Workcenter> {
            self.workcenter
        }
    }

    #[test]
    fn admin_passes_every_check() {
        let identity = admin();
        for resource in [
            Resource::Tasks,
            Resource::VenueFeatures,
            Resource::Events,
            Resource::Users,
            Resource::Integrations,
        ] {
            for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
                assert!(identity.is_allowed(&AccessQuery::new(resource, action)));
                for workcenter in Workcenter::ALL {
                    assert!(identity.is_allowed(&AccessQuery::scoped(
                        resource, action, workcenter
                    )));
                }
            }
        }
        for workcenter in Workcenter::ALL {
            assert!(identity.can_access_workcenter(workcenter));
        }
    }

    #[test]
    fn viewer_reads_everywhere_but_never_writes() {
        let identity = viewer();
        for resource in [Resource::Tasks, Resource::VenueFeatures, Resource::Events] {
            assert!(identity.is_allowed(&AccessQuery::new(resource, Action::Read)));
            for workcenter in Workcenter::ALL {
                assert!(identity.is_allowed(&AccessQuery::scoped(
                    resource,
                    Action::Read,
                    workcenter
                )));
                for action in [Action::Create, Action::Update, Action::Delete] {
                    assert!(!identity.is_allowed(&AccessQuery::scoped(
                        resource, action, workcenter
                    )));
                }
            }
        }
    }

    #[test]
    fn workcenter_scoping_is_intersectional_not_additive() {
        let identity = production_lead();
        // The scoped grant satisfies the unscoped query...
        assert!(identity.is_allowed(&AccessQuery::new(Resource::Tasks, Action::Update)));
        // ...and the matching scoped query...
        assert!(identity.is_allowed(&AccessQuery::scoped(
            Resource::Tasks,
            Action::Update,
            Workcenter::Production
        )));
        // ...but never a query scoped to a different workcenter.
        assert!(!identity.is_allowed(&AccessQuery::scoped(
            Resource::Tasks,
            Action::Update,
            Workcenter::Security
        )));
    }

    #[test]
    fn unscoped_grant_applies_under_any_requested_workcenter() {
        let identity = Identity::new("floater", Role::OperationsLead)
            .with_workcenters([Workcenter::Operations])
            .with_grants(vec![Grant::new(Resource::Tasks, Action::Read)]);
        for workcenter in Workcenter::ALL {
            assert!(identity.is_allowed(&AccessQuery::scoped(
                Resource::Tasks,
                Action::Read,
                workcenter
            )));
        }
    }

    #[test]
    fn grants_are_action_specific() {
        // Holding update does not imply read.
        let identity = production_lead();
        assert!(!identity.is_allowed(&AccessQuery::new(Resource::Tasks, Action::Read)));
    }

    #[test]
    fn membership_alone_does_not_authorize_actions() {
        let identity = Identity::new("member", Role::SecurityLead)
            .with_workcenters([Workcenter::Security]);
        assert!(identity.can_access_workcenter(Workcenter::Security));
        assert!(!identity.can_access_scoped_resource(
            Resource::Tasks,
            Action::Update,
            Workcenter::Security
        ));
    }

    #[test]
    fn grant_alone_does_not_open_a_foreign_workcenter() {
        // An unscoped grant without membership still fails the composed check.
        let identity = Identity::new("grantee", Role::OperationsLead)
            .with_workcenters([Workcenter::Operations])
            .with_grants(vec![Grant::new(Resource::Tasks, Action::Update)]);
        assert!(identity.can_update_task(Workcenter::Operations));
        assert!(!identity.can_update_task(Workcenter::Security));
    }

    #[test]
    fn multi_workcenter_membership() {
        let identity = Identity::new("multi", Role::OperationsLead)
            .with_workcenters([Workcenter::Operations, Workcenter::Production]);
        assert!(identity.can_access_workcenter(Workcenter::Operations));
        assert!(identity.can_access_workcenter(Workcenter::Production));
        assert!(!identity.can_access_workcenter(Workcenter::Security));

        let records = vec![
            OwnedRecord {
                name: "ops",
                workcenter: Some(Workcenter::Operations),
            },
            OwnedRecord {
                name: "sec",
                workcenter: Some(Workcenter::Security),
            },
            OwnedRecord {
                name: "prod",
                workcenter: Some(Workcenter::Production),
            },
        ];
        let filtered = filter_by_owned_workcenter(&identity, records);
        assert_eq!(
            filtered.iter().map(|r| r.name).collect::<Vec<_>>(),
            vec!["ops", "prod"]
        );
    }

    #[test]
    fn visibility_filter_is_stable_idempotent_and_a_subset() {
        let identity = Identity::new("ops", Role::OperationsLead)
            .with_workcenters([Workcenter::Operations]);
        let records = vec![
            VisibleRecord {
                name: "open",
                access: vec![],
            },
            VisibleRecord {
                name: "sec-only",
                access: vec![Workcenter::Security],
            },
            VisibleRecord {
                name: "ops-or-sec",
                access: vec![Workcenter::Security, Workcenter::Operations],
            },
        ];

        let once = filter_by_workcenter_access(&identity, records.clone());
        assert_eq!(
            once.iter().map(|r| r.name).collect::<Vec<_>>(),
            vec!["open", "ops-or-sec"]
        );
        assert!(once.iter().all(|record| records.contains(record)));

        let twice = filter_by_workcenter_access(&identity, once.clone());
        assert_eq!(twice, once);
    }

    #[test]
    fn empty_access_set_is_visible_to_every_identity() {
        let record = || VisibleRecord {
            name: "open",
            access: vec![],
        };
        // Even an identity with no memberships at all sees it.
        let nobody = viewer();
        assert_eq!(filter_by_workcenter_access(&nobody, vec![record()]).len(), 1);
        let lead = production_lead();
        assert_eq!(filter_by_workcenter_access(&lead, vec![record()]).len(), 1);
    }

    #[test]
    fn ownerless_records_are_withheld_from_non_admins() {
        let records = || {
            vec![
                OwnedRecord {
                    name: "orphan",
                    workcenter: None,
                },
                OwnedRecord {
                    name: "prod",
                    workcenter: Some(Workcenter::Production),
                },
            ]
        };
        let lead = production_lead();
        let filtered = filter_by_owned_workcenter(&lead, records());
        assert_eq!(
            filtered.iter().map(|r| r.name).collect::<Vec<_>>(),
            vec!["prod"]
        );

        // Admin still sees everything, unchanged and in order.
        let all = filter_by_owned_workcenter(&admin(), records());
        assert_eq!(
            all.iter().map(|r| r.name).collect::<Vec<_>>(),
            vec!["orphan", "prod"]
        );
    }

    #[test]
    fn production_lead_boundary_scenario() {
        let identity = production_lead();
        assert!(!identity.is_allowed(&AccessQuery::scoped(
            Resource::Tasks,
            Action::Update,
            Workcenter::Security
        )));
        assert!(identity.is_allowed(&AccessQuery::scoped(
            Resource::Tasks,
            Action::Update,
            Workcenter::Production
        )));
        assert!(!identity.is_allowed(&AccessQuery::new(Resource::Tasks, Action::Read)));
    }

    #[test]
    fn derived_task_checks_match_the_composed_check() {
        let identity = Identity::new("ops", Role::OperationsLead)
            .with_workcenters([Workcenter::Operations])
            .with_grants(Role::OperationsLead.default_grants());
        assert!(identity.can_create_task_in_workcenter(Workcenter::Operations));
        assert!(identity.can_update_task(Workcenter::Operations));
        assert!(identity.can_delete_task(Workcenter::Operations));
        assert!(!identity.can_create_task_in_workcenter(Workcenter::Finance));
        assert!(!identity.can_update_task(Workcenter::Finance));
        assert!(!identity.can_delete_task(Workcenter::Finance));
    }
}
