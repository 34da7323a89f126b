use crate::{ALERT_DETAILS, ALERT_SUMMARY, FILE_EVENT_V2};
use incydr_types::Schema;
use std::fmt;
use std::str::FromStr;

/// Resources whose records can be listed, rendered and exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Alert,
    AlertDetails,
    FileEvent,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Alert, Resource::AlertDetails, Resource::FileEvent];

    pub fn schema(self) -> &'static Schema {
        match self {
            Resource::Alert => &ALERT_SUMMARY,
            Resource::AlertDetails => &ALERT_DETAILS,
            Resource::FileEvent => &FILE_EVENT_V2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Alert => "alert",
            Resource::AlertDetails => "alert-details",
            Resource::FileEvent => "file-event",
        }
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("Unknown resource: {}", s))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for resource in Resource::ALL {
            assert_eq!(resource.as_str().parse::<Resource>(), Ok(resource));
        }
        assert!("alerts".parse::<Resource>().is_err());
    }

    #[test]
    fn test_schema_names() {
        assert_eq!(Resource::Alert.schema().name(), "AlertSummary");
        assert_eq!(Resource::FileEvent.schema().name(), "FileEventV2");
    }
}
