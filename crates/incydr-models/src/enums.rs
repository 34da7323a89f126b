//! Closed value sets used by resource fields.

use incydr_types::EnumDef;

pub static SEVERITY: EnumDef = EnumDef {
    name: "Severity",
    members: &["LOW", "MEDIUM", "HIGH"],
};

pub static RISK_SEVERITY: EnumDef = EnumDef {
    name: "RiskSeverity",
    members: &["NO_RISK_INDICATED", "LOW", "MODERATE", "HIGH", "CRITICAL"],
};

pub static ALERT_STATE: EnumDef = EnumDef {
    name: "AlertState",
    members: &["OPEN", "RESOLVED", "PENDING", "IN_PROGRESS"],
};

pub static RULE_TYPE: EnumDef = EnumDef {
    name: "RuleType",
    members: &[
        "FED_ENDPOINT_EXFILTRATION",
        "FED_CLOUD_SHARE_PERMISSIONS",
        "FED_FILE_TYPE_MISMATCH",
        "FED_FILE_NAME",
        "FED_COMPOSITE",
    ],
};

pub static WATCHLIST_TYPE: EnumDef = EnumDef {
    name: "WatchlistType",
    members: &[
        "CONTRACT_EMPLOYEE",
        "DEPARTING_EMPLOYEE",
        "ELEVATED_ACCESS_PRIVILEGES",
        "FLIGHT_RISK",
        "HIGH_IMPACT_EMPLOYEE",
        "NEW_EMPLOYEE",
        "PERFORMANCE_CONCERNS",
        "POOR_SECURITY_PRACTICES",
        "SUSPICIOUS_SYSTEM_ACTIVITY",
        "USER_DEFINED",
    ],
};

pub static NOTIFICATION_TYPE: EnumDef = EnumDef {
    name: "NotificationType",
    members: &["EMAIL"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_are_exact_strings() {
        assert!(RISK_SEVERITY.contains("MODERATE"));
        assert!(!RISK_SEVERITY.contains("moderate"));
    }

    #[test]
    fn test_invalid_state_lists_members() {
        assert_eq!(
            ALERT_STATE.invalid_message("CLOSED"),
            "'CLOSED' is not a valid AlertState. Expected one of ['OPEN', 'RESOLVED', 'PENDING', 'IN_PROGRESS']"
        );
    }
}
