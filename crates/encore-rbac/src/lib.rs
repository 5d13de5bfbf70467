//! Encore authorization primitives shared by the operations API.
//!
//! # Purpose
//! Centralizes the permission model (roles, workcenters, grants) and the
//! decision/filtering operations every authorized route depends on.
//!
//! # How it fits
//! The API service resolves a bearer token to an [`Identity`], then asks this
//! crate whether the identity may perform an action before touching the
//! store, and filters result sets down to the visible subset before they
//! reach a client.
//!
//! # Key invariants
//! - The `admin` role satisfies every check unconditionally; the bypass
//!   lives in one place, not at call sites.
//! - Grants are `resource` + `action` pairs, optionally scoped to a single
//!   workcenter; an unscoped grant applies in every workcenter.
//! - Every operation is a total, synchronous function over immutable
//!   values: no I/O, no locking, no panics on well-formed input.
//!
//! # Examples
//! ```rust
//! use encore_rbac::{AccessQuery, Action, Grant, Identity, Resource, Role, Workcenter};
//!
//! let lead = Identity::new("u-1", Role::ProductionLead)
//!     .with_workcenters([Workcenter::Production])
//!     .with_grants(vec![Grant::scoped(
//!         Resource::Tasks,
//!         Action::Update,
//!         Workcenter::Production,
//!     )]);
//! let query = AccessQuery::scoped(Resource::Tasks, Action::Update, Workcenter::Production);
//! assert!(lead.is_allowed(&query));
//! ```
//!
//! # Common pitfalls
//! - Workcenter membership alone never authorizes an action; the identity
//!   must also hold a matching grant (see
//!   [`Identity::can_access_scoped_resource`]).
//! - A grant scoped to one workcenter does not satisfy a query scoped to
//!   another, even though it satisfies the unscoped form of the same query.

mod action;
mod engine;
mod errors;
mod grant;
mod identity;
mod resource;
mod role;
mod workcenter;

pub use action::Action;
pub use engine::{
    OwnedByWorkcenter, VisibleToWorkcenters, filter_by_owned_workcenter,
    filter_by_workcenter_access, is_visible_to,
};
pub use errors::{RbacError, RbacResult};
pub use grant::{AccessQuery, Grant};
pub use identity::Identity;
pub use resource::Resource;
pub use role::Role;
pub use workcenter::Workcenter;
