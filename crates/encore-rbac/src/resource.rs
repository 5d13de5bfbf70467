use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Tasks,
    VenueFeatures,
    Events,
    Users,
    Integrations,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Tasks => "tasks",
            Resource::VenueFeatures => "venue_features",
            Resource::Events => "events",
            Resource::Users => "users",
            Resource::Integrations => "integrations",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Resource {
    type Err = crate::RbacError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "tasks" => Ok(Resource::Tasks),
            "venue_features" => Ok(Resource::VenueFeatures),
            "events" => Ok(Resource::Events),
            "users" => Ok(Resource::Users),
            "integrations" => Ok(Resource::Integrations),
            other => Err(crate::RbacError::UnknownResource(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Resource;
    use std::str::FromStr;

    #[test]
    fn resource_string_roundtrip() {
        let resources = [
            Resource::Tasks,
            Resource::VenueFeatures,
            Resource::Events,
            Resource::Users,
            Resource::Integrations,
        ];
        for resource in resources {
            let as_str = resource.as_str();
            assert_eq!(Resource::from_str(as_str).ok(), Some(resource));
            assert_eq!(resource.to_string(), as_str);
        }
    }

    #[test]
    fn resource_from_str_invalid() {
        assert!(Resource::from_str("stages").is_err());
    }
}
