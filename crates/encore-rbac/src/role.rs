use crate::{Action, Grant, Resource, Workcenter};
use serde::{Deserialize, Serialize};

/// Closed set of roles an identity can hold. Exactly one role per identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    OperationsLead,
    ProductionLead,
    SecurityLead,
    WorkforceLead,
    VendorLead,
    SponsorLead,
    MarketingLead,
    FinanceLead,
    Viewer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::OperationsLead => "operations_lead",
            Role::ProductionLead => "production_lead",
            Role::SecurityLead => "security_lead",
            Role::WorkforceLead => "workforce_lead",
            Role::VendorLead => "vendor_lead",
            Role::SponsorLead => "sponsor_lead",
            Role::MarketingLead => "marketing_lead",
            Role::FinanceLead => "finance_lead",
            Role::Viewer => "viewer",
        }
    }

    /// The workcenter a lead role is responsible for, if any.
    pub fn lead_workcenter(self) -> Option<Workcenter> {
        match self {
            Role::OperationsLead => Some(Workcenter::Operations),
            Role::ProductionLead => Some(Workcenter::Production),
            Role::SecurityLead => Some(Workcenter::Security),
            Role::WorkforceLead => Some(Workcenter::Workforce),
            Role::VendorLead => Some(Workcenter::Vendors),
            Role::SponsorLead => Some(Workcenter::Sponsors),
            Role::MarketingLead => Some(Workcenter::Marketing),
            Role::FinanceLead => Some(Workcenter::Finance),
            Role::Admin | Role::Viewer => None,
        }
    }

    /// Default workcenter memberships assigned when a user or token does not
    /// carry an explicit set. Admin needs none (the role bypasses every
    /// check) and viewers belong nowhere.
    pub fn default_workcenters(self) -> Vec<Workcenter> {
        self.lead_workcenter().into_iter().collect()
    }

    /// Default grants assigned when a user or token does not carry an
    /// explicit list. Leads get full task and venue-feature rights inside
    /// their own workcenter plus event visibility; viewers get read
    /// everywhere; admin needs no grants.
    pub fn default_grants(self) -> Vec<Grant> {
        if self == Role::Viewer {
            return vec![
                Grant::new(Resource::Tasks, Action::Read),
                Grant::new(Resource::VenueFeatures, Action::Read),
                Grant::new(Resource::Events, Action::Read),
            ];
        }
        // Admin bypasses every check and needs no grants.
        let Some(workcenter) = self.lead_workcenter() else {
            return Vec::new();
        };
        let mut grants = Vec::new();
        for resource in [Resource::Tasks, Resource::VenueFeatures] {
            for action in [Action::Create, Action::Read, Action::Update, Action::Delete] {
                grants.push(Grant::scoped(resource, action, workcenter));
            }
        }
        grants.push(Grant::new(Resource::Events, Action::Read));
        grants
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = crate::RbacError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Role::Admin),
            "operations_lead" => Ok(Role::OperationsLead),
            "production_lead" => Ok(Role::ProductionLead),
            "security_lead" => Ok(Role::SecurityLead),
            "workforce_lead" => Ok(Role::WorkforceLead),
            "vendor_lead" => Ok(Role::VendorLead),
            "sponsor_lead" => Ok(Role::SponsorLead),
            "marketing_lead" => Ok(Role::MarketingLead),
            "finance_lead" => Ok(Role::FinanceLead),
            "viewer" => Ok(Role::Viewer),
            other => Err(crate::RbacError::UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const ALL_ROLES: [Role; 10] = [
        Role::Admin,
        Role::OperationsLead,
        Role::ProductionLead,
        Role::SecurityLead,
        Role::WorkforceLead,
        Role::VendorLead,
        Role::SponsorLead,
        Role::MarketingLead,
        Role::FinanceLead,
        Role::Viewer,
    ];

    #[test]
    fn role_string_roundtrip() {
        for role in ALL_ROLES {
            let as_str = role.as_str();
            assert_eq!(Role::from_str(as_str).ok(), Some(role));
            assert_eq!(role.to_string(), as_str);
        }
    }

    #[test]
    fn role_from_str_invalid() {
        assert!(Role::from_str("superadmin").is_err());
    }

    #[test]
    fn lead_defaults_stay_inside_own_workcenter() {
        let grants = Role::SecurityLead.default_grants();
        assert!(
            grants
                .iter()
                .filter(|grant| grant.workcenter.is_some())
                .all(|grant| grant.workcenter == Some(Workcenter::Security))
        );
        assert_eq!(
            Role::SecurityLead.default_workcenters(),
            vec![Workcenter::Security]
        );
    }

    #[test]
    fn viewer_defaults_are_read_only_and_unscoped() {
        let grants = Role::Viewer.default_grants();
        assert!(!grants.is_empty());
        assert!(
            grants
                .iter()
                .all(|grant| grant.action == Action::Read && grant.workcenter.is_none())
        );
        assert!(Role::Viewer.default_workcenters().is_empty());
    }

    #[test]
    fn admin_defaults_are_empty() {
        assert!(Role::Admin.default_grants().is_empty());
        assert!(Role::Admin.default_workcenters().is_empty());
    }
}
