use serde::{Deserialize, Serialize};

/// Organizational unit scoping both identity membership and record
/// visibility/ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Workcenter {
    Operations,
    Production,
    Security,
    Workforce,
    Vendors,
    Sponsors,
    Marketing,
    Finance,
}

impl Workcenter {
    pub const ALL: [Workcenter; 8] = [
        Workcenter::Operations,
        Workcenter::Production,
        Workcenter::Security,
        Workcenter::Workforce,
        Workcenter::Vendors,
        Workcenter::Sponsors,
        Workcenter::Marketing,
        Workcenter::Finance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Workcenter::Operations => "operations",
            Workcenter::Production => "production",
            Workcenter::Security => "security",
            Workcenter::Workforce => "workforce",
            Workcenter::Vendors => "vendors",
            Workcenter::Sponsors => "sponsors",
            Workcenter::Marketing => "marketing",
            Workcenter::Finance => "finance",
        }
    }
}

impl std::fmt::Display for Workcenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Workcenter {
    type Err = crate::RbacError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "operations" => Ok(Workcenter::Operations),
            "production" => Ok(Workcenter::Production),
            "security" => Ok(Workcenter::Security),
            "workforce" => Ok(Workcenter::Workforce),
            "vendors" => Ok(Workcenter::Vendors),
            "sponsors" => Ok(Workcenter::Sponsors),
            "marketing" => Ok(Workcenter::Marketing),
            "finance" => Ok(Workcenter::Finance),
            other => Err(crate::RbacError::UnknownWorkcenter(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Workcenter;
    use std::str::FromStr;

    #[test]
    fn workcenter_string_roundtrip() {
        for workcenter in Workcenter::ALL {
            let as_str = workcenter.as_str();
            assert_eq!(Workcenter::from_str(as_str).ok(), Some(workcenter));
            assert_eq!(workcenter.to_string(), as_str);
        }
    }

    #[test]
    fn workcenter_from_str_invalid() {
        assert!(Workcenter::from_str("catering").is_err());
    }
}
