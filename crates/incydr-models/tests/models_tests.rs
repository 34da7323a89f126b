use incydr_models::{ALERT_DETAILS, ALERT_SUMMARY, FILE_EVENT_V2};
use incydr_types::{Record, Value};
use serde_json::json;

fn alert_json() -> serde_json::Value {
    json!({
        "tenantId": "MyExampleTenant",
        "type": "FED_ENDPOINT_EXFILTRATION",
        "name": "Removable Media Exfiltration Rule",
        "actor": "exampleUser@mycompany.com",
        "riskSeverity": "MODERATE",
        "id": "alertId",
        "createdAt": "2020-02-19T01:57:45.006683Z",
        "state": "OPEN",
    })
}

#[test]
fn alert_summary_accepts_api_payload() {
    let record = Record::from_json(&ALERT_SUMMARY, &alert_json()).unwrap();
    assert_eq!(record.get("tenant_id"), Some(&Value::from("MyExampleTenant")));
    assert_eq!(record.get("risk_severity"), Some(&Value::from("MODERATE")));
    assert_eq!(record.get("watchlists"), Some(&Value::Null));
}

#[test]
fn alert_summary_reports_every_bad_field() {
    let mut payload = alert_json();
    payload["tenantId"] = json!("x".repeat(41));
    payload["state"] = json!("CLOSED");

    let err = Record::from_json(&ALERT_SUMMARY, &payload).unwrap_err();
    assert_eq!(
        err.to_string(),
        "2 validation errors for AlertSummary\n\
         tenant_id\n  ensure this value has at most 40 characters\n\
         state\n  'CLOSED' is not a valid AlertState. Expected one of ['OPEN', 'RESOLVED', 'PENDING', 'IN_PROGRESS']"
    );
}

#[test]
fn alert_details_carry_observations_and_note() {
    let mut payload = alert_json();
    payload["observations"] = json!([
        {"id": "o1", "observedAt": "2020-02-19T01:57:45Z", "type": "FedEndpointExfiltration"},
    ]);
    payload["note"] = json!({"lastModifiedAt": "2020-02-19T01:57:45Z", "message": "checked"});

    let record = Record::from_json(&ALERT_DETAILS, &payload).unwrap();
    assert_eq!(record.get("observations").and_then(Value::as_list).map(<[_]>::len), Some(1));
    let note = record.get("note").and_then(Value::as_record).unwrap();
    assert_eq!(note.get("message"), Some(&Value::from("checked")));
}

#[test]
fn canonical_mapping_can_use_api_aliases() {
    let record = Record::from_json(
        &FILE_EVENT_V2,
        &json!({"@timestamp": "2020-10-27T15:16:05Z", "file": {"name": "ReadMe.md", "sizeInBytes": 10}}),
    )
    .unwrap();

    let by_alias = record.to_json(true);
    assert_eq!(by_alias["@timestamp"], json!("2020-10-27T15:16:05Z"));
    assert_eq!(by_alias["file"]["sizeInBytes"], json!(10));

    let by_name = record.to_json(false);
    assert_eq!(by_name["timestamp"], json!("2020-10-27T15:16:05Z"));
    assert_eq!(by_name["file"]["size_in_bytes"], json!(10));
    assert_eq!(by_name["event"], json!(null));
}
