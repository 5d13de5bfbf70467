//! Grant and access-query primitives.
//!
//! # Purpose
//! Defines the strongly typed permission statements held by identities and
//! the queries evaluated against them.
//!
//! # How it fits
//! The auth layer deserializes grants out of verified token claims; route
//! handlers build [`AccessQuery`] values which the engine evaluates.
//!
//! # Key invariants
//! - Grant strings are `resource.action` with an optional `@workcenter`
//!   suffix.
//! - A grant with no workcenter is broader than one scoped to a workcenter
//!   for the same resource/action pair.
use crate::{Action, RbacError, RbacResult, Resource, Workcenter};
use serde::{Deserialize, Serialize};

/// One permission statement: an action on a resource class, optionally
/// confined to a single workcenter.
///
/// # Invariants
/// - `workcenter: None` means the grant applies in every workcenter.
///
/// # Example
/// ```rust
/// use encore_rbac::{Action, Grant, Resource, Workcenter};
///
/// let scoped = Grant::scoped(Resource::Tasks, Action::Update, Workcenter::Production);
/// assert_eq!(scoped.as_string(), "tasks.update@production");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    pub resource: Resource,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workcenter: Option<Workcenter>,
}

impl Grant {
    /// Create an unscoped grant that applies in every workcenter.
    pub fn new(resource: Resource, action: Action) -> Self {
        Self {
            resource,
            action,
            workcenter: None,
        }
    }

    /// Create a grant confined to one workcenter.
    pub fn scoped(resource: Resource, action: Action, workcenter: Workcenter) -> Self {
        Self {
            resource,
            action,
            workcenter: Some(workcenter),
        }
    }

    /// Render the grant as a `resource.action[@workcenter]` string.
    pub fn as_string(&self) -> String {
        match self.workcenter {
            Some(workcenter) => {
                format!("{}.{}@{}", self.resource, self.action, workcenter)
            }
            None => format!("{}.{}", self.resource, self.action),
        }
    }
}

impl std::fmt::Display for Grant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl std::str::FromStr for Grant {
    type Err = RbacError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // Peel the optional workcenter suffix first, then split the pair.
        let (pair, workcenter) = match value.split_once('@') {
            Some((pair, workcenter)) => (pair, Some(workcenter.parse::<Workcenter>()?)),
            None => (value, None),
        };
        let (resource, action) = pair
            .rsplit_once('.')
            .ok_or_else(|| RbacError::InvalidGrant(value.to_string()))?;
        Ok(Self {
            resource: resource.parse()?,
            action: action.parse()?,
            workcenter,
        })
    }
}

impl Grant {
    /// Parse a grant from its string form.
    ///
    /// # Errors
    /// - [`RbacError::InvalidGrant`] if the `resource.action` pair is missing.
    /// - [`RbacError::UnknownResource`], [`RbacError::UnknownAction`], or
    ///   [`RbacError::UnknownWorkcenter`] for tags outside the closed sets.
    pub fn parse(value: &str) -> RbacResult<Self> {
        value.parse()
    }
}

/// The question asked of the engine: may the identity perform `action` on
/// `resource`, optionally within one workcenter?
///
/// Omit the workcenter when the operation is not scoped to a single unit,
/// e.g. listing across all units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessQuery {
    pub resource: Resource,
    pub action: Action,
    pub workcenter: Option<Workcenter>,
}

impl AccessQuery {
    pub fn new(resource: Resource, action: Action) -> Self {
        Self {
            resource,
            action,
            workcenter: None,
        }
    }

    pub fn scoped(resource: Resource, action: Action, workcenter: Workcenter) -> Self {
        Self {
            resource,
            action,
            workcenter: Some(workcenter),
        }
    }
}

impl std::fmt::Display for AccessQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.workcenter {
            Some(workcenter) => {
                write!(f, "{}.{}@{}", self.resource, self.action, workcenter)
            }
            None => write!(f, "{}.{}", self.resource, self.action),
        }
    }
}
