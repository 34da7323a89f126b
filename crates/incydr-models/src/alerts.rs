//! Alert schemas as returned by the alerts API.
//!
//! [`ALERT_DETAILS`] extends [`ALERT_SUMMARY`] with observations and the most
//! recent note; both share the summary field table in the same order.

use crate::enums::{
    ALERT_STATE, NOTIFICATION_TYPE, RISK_SEVERITY, RULE_TYPE, SEVERITY, WATCHLIST_TYPE,
};
use crate::iso_datetime;
use incydr_types::{FieldDef, RenderHint, Schema, Value, ValueKind};
use once_cell::sync::Lazy;

pub const TENANT_ID_MAX_LENGTH: usize = 40;

pub static OBSERVATION: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "Observation",
        vec![
            FieldDef::string("id")
                .describe("Id of given observation.")
                .example("uniqueObservationId"),
            FieldDef::datetime("observed_at")
                .alias("observedAt")
                .required()
                .describe("Timestamp when the activity was first observed.")
                .example("2020-02-19T01:57:45.006683Z"),
            FieldDef::datetime("last_observed_at")
                .alias("lastObservedAt")
                .describe("Timestamp when the activity was last observed.")
                .example("2020-02-19T01:57:45.006683Z"),
            FieldDef::string("type")
                .describe("The type of observation data recorded.")
                .example("FedCloudSharePermissions"),
            FieldDef::string("data")
                .describe("The JSON formatted observation data rolled into one aggregation."),
        ],
    )
});

pub static NOTE: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "Note",
        vec![
            FieldDef::string("id")
                .describe("Unique id of the note.")
                .example("noteId"),
            FieldDef::datetime("last_modified_at")
                .alias("lastModifiedAt")
                .required()
                .describe("Timestamp of when the note was last modified."),
            FieldDef::string("last_modified_by")
                .alias("lastModifiedBy")
                .describe("User who last modified the note.")
                .example("exampleUsername"),
            FieldDef::string("message")
                .describe("The note itself.")
                .example("This is a note."),
        ],
    )
});

pub static NOTIFICATION_INFO: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "NotificationInfo",
        vec![
            FieldDef::enumeration("notification_type", &NOTIFICATION_TYPE)
                .alias("notificationType")
                .required()
                .describe("Type of notification."),
            FieldDef::string("notification_address")
                .alias("notificationAddress")
                .describe("Address notification was sent to.")
                .example("myUsername@company.com"),
        ],
    )
});

pub static WATCHLIST: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "Watchlist",
        vec![
            FieldDef::string("id")
                .describe("Unique id of this watchlist.")
                .example("guid"),
            FieldDef::string("name")
                .describe("Name of the watchlist.")
                .example("Development Department"),
            FieldDef::enumeration("type", &WATCHLIST_TYPE)
                .required()
                .describe("Type of watchlist.")
                .example("DEPARTING_EMPLOYEE"),
            FieldDef::boolean("is_significant")
                .alias("isSignificant")
                .required()
                .describe("Indicates whether the watchlist was part of the triggering rule's criteria.")
                .example("true"),
        ],
    )
});

pub static ALERT_SUMMARY: Lazy<Schema> = Lazy::new(|| {
    Schema::new("AlertSummary", summary_fields())
        .with_encoder(ValueKind::DateTime, iso_datetime)
});

pub static ALERT_DETAILS: Lazy<Schema> = Lazy::new(|| {
    let mut fields = summary_fields();
    fields.push(
        FieldDef::nested_list("observations", &OBSERVATION)
            .describe("Observation list included on the alert."),
    );
    fields.push(
        FieldDef::nested("note", &NOTE).describe("Most recent note added to the alert."),
    );
    Schema::new("AlertDetails", fields).with_encoder(ValueKind::DateTime, iso_datetime)
});

fn summary_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::string("tenant_id")
            .alias("tenantId")
            .required()
            .max_length(TENANT_ID_MAX_LENGTH)
            .describe("The unique identifier representing the tenant.")
            .example("MyExampleTenant"),
        FieldDef::enumeration("type", &RULE_TYPE)
            .required()
            .describe("Rule type that generated the alert."),
        FieldDef::string("name")
            .describe("The name of the alert.  Same as the name of the rule that triggered it.")
            .example("Removable Media Exfiltration Rule"),
        FieldDef::string("description")
            .describe("The description of the alert.  Same as the description of the rule that triggered it."),
        FieldDef::string("actor")
            .describe("The user who triggered the alert.")
            .example("exampleUser@mycompany.com"),
        FieldDef::string("actor_id")
            .alias("actorId")
            .describe("The authority user id who triggered the alert, if it is available.")
            .example("authorityUserId"),
        FieldDef::string("target"),
        FieldDef::enumeration("severity", &SEVERITY)
            .describe("Indicates static rule severity of the alert."),
        FieldDef::enumeration("risk_severity", &RISK_SEVERITY)
            .alias("riskSeverity")
            .describe("Indicates event risk severity of the alert.")
            .example("MODERATE"),
        FieldDef::nested_list("notification_info", &NOTIFICATION_INFO)
            .alias("notificationInfo")
            .describe("Notification information of the alert.")
            .hint(RenderHint::Table, notification_labels),
        FieldDef::string("rule_id")
            .alias("ruleId")
            .describe("The unique id corresponding to the rule which triggered the alert.")
            .example("uniqueRuleId"),
        FieldDef::string("rule_source")
            .alias("ruleSource")
            .describe("Indicates source of rule creation.  Either alerting or lens application name.")
            .example("Departing Employee"),
        FieldDef::nested_list("watchlists", &WATCHLIST)
            .describe("Watchlists the actor is on at the time of the alert.")
            .hint(RenderHint::Table, watchlist_labels),
        FieldDef::string("id")
            .describe("The unique id of the alert.")
            .example("alertId"),
        FieldDef::datetime("created_at")
            .alias("createdAt")
            .required()
            .describe("The timestamp when the alert was created.")
            .example("2020-02-19T01:57:45.006683Z"),
        FieldDef::enumeration("state", &ALERT_STATE)
            .required()
            .describe("The current state of the alert."),
        FieldDef::string("state_last_modified_by").alias("stateLastModifiedBy"),
        FieldDef::datetime("state_last_modified_at").alias("stateLastModifiedAt"),
    ]
}

/// One line per watchlist: `name (TYPE)`, flagging the ones that triggered.
fn watchlist_labels(value: &Value) -> Value {
    let Some(items) = value.as_list() else {
        return value.clone();
    };
    let labels = items
        .iter()
        .filter_map(Value::as_record)
        .map(|watchlist| {
            let name = watchlist.get("name").and_then(Value::as_str).unwrap_or("-");
            let kind = watchlist.get("type").and_then(Value::as_str).unwrap_or("-");
            let significant = matches!(watchlist.get("is_significant"), Some(Value::Bool(true)));
            let label = if significant {
                format!("{} ({}) *", name, kind)
            } else {
                format!("{} ({})", name, kind)
            };
            Value::String(label)
        })
        .collect();
    Value::List(labels)
}

fn notification_labels(value: &Value) -> Value {
    let Some(items) = value.as_list() else {
        return value.clone();
    };
    let labels = items
        .iter()
        .filter_map(Value::as_record)
        .map(|info| {
            let kind = info
                .get("notification_type")
                .and_then(Value::as_str)
                .unwrap_or("-");
            match info.get("notification_address").and_then(Value::as_str) {
                Some(address) => Value::String(format!("{}: {}", kind, address)),
                None => Value::String(kind.to_string()),
            }
        })
        .collect();
    Value::List(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use incydr_types::Record;
    use serde_json::json;

    fn watchlists() -> Value {
        let record = Record::from_json(
            &ALERT_SUMMARY,
            &json!({
                "tenantId": "t",
                "type": "FED_FILE_NAME",
                "createdAt": "2024-01-01T00:00:00Z",
                "state": "OPEN",
                "watchlists": [
                    {"name": "Leavers", "type": "DEPARTING_EMPLOYEE", "isSignificant": true},
                    {"type": "FLIGHT_RISK", "isSignificant": false},
                ],
            }),
        )
        .unwrap();
        record.get("watchlists").cloned().unwrap()
    }

    #[test]
    fn test_watchlist_labels() {
        assert_eq!(
            watchlist_labels(&watchlists()),
            Value::List(vec![
                Value::from("Leavers (DEPARTING_EMPLOYEE) *"),
                Value::from("- (FLIGHT_RISK)"),
            ])
        );
    }

    #[test]
    fn test_labels_leave_absent_lists_alone() {
        assert_eq!(watchlist_labels(&Value::Null), Value::Null);
        assert_eq!(notification_labels(&Value::Null), Value::Null);
    }

    #[test]
    fn test_details_extend_summary_in_order() {
        let summary: Vec<&str> = ALERT_SUMMARY.fields().iter().map(|f| f.name).collect();
        let details: Vec<&str> = ALERT_DETAILS.fields().iter().map(|f| f.name).collect();
        assert_eq!(&details[..summary.len()], &summary[..]);
        assert_eq!(&details[summary.len()..], &["observations", "note"]);
    }
}
