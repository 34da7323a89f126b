use incydr_engine::{
    Error, flatten_fields, get_field_value_and_info, get_fields, iter_model_formatted, resolve,
};
use incydr_models::{ALERT_DETAILS, FILE_EVENT_V2};
use incydr_types::{Record, RenderHint, Value};
use serde_json::json;

#[test]
fn wildcard_selects_file_fields_in_schema_order() {
    let fields: Vec<String> = get_fields(&FILE_EVENT_V2, &["event.id", "file.*"], true)
        .unwrap()
        .collect();

    assert_eq!(fields[0], "event.id");
    assert_eq!(fields[1], "file.category");
    assert!(fields.contains(&"file.hash.md5".to_string()));
    assert!(fields[1..].iter().all(|f| f.starts_with("file.")));
}

#[test]
fn every_flattened_path_resolves_on_an_empty_record() {
    let record = Record::empty(&FILE_EVENT_V2);
    for path in flatten_fields(&FILE_EVENT_V2) {
        let components: Vec<&str> = path.split('.').collect();
        let (value, field) = get_field_value_and_info(&record, &components).unwrap();
        assert!(value.is_null(), "{} should be absent", path);
        assert_eq!(Some(field.name), components.last().copied());
    }
}

#[test]
fn lists_of_records_stay_whole() {
    let paths: Vec<String> = flatten_fields(&ALERT_DETAILS).collect();
    assert!(paths.contains(&"observations".to_string()));
    assert!(paths.contains(&"note.message".to_string()));
    assert!(!paths.iter().any(|p| p.starts_with("observations.")));
}

#[test]
fn unknown_include_lists_valid_fields() {
    let err = get_fields(&FILE_EVENT_V2, &["file.colour"], true).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("'file.colour' is not a valid field path for model: FileEventV2."));
    assert!(message.contains("file.hash.sha256"));
}

#[test]
fn resolver_reports_field_metadata() {
    let record = Record::empty(&FILE_EVENT_V2);
    let (_, field) = resolve(&record, "file.hash.md5").unwrap();
    assert_eq!(field.description, Some("The MD5 hash of the file contents."));

    assert!(matches!(
        resolve(&record, "file.hash.crc"),
        Err(Error::Types(incydr_types::Error::UnknownField { schema: "Hash", .. }))
    ));
}

#[test]
fn formatted_file_event_encodes_timestamps() {
    let record = Record::from_json(
        &FILE_EVENT_V2,
        &json!({
            "@timestamp": "2020-10-27T15:16:05.369203Z",
            "event": {"id": "e1", "inserted": "2020-10-27T15:16:06Z"},
            "risk": {"indicators": [{"name": "Browser upload", "weight": 5}]},
        }),
    )
    .unwrap();

    // API aliases are accepted on input but are not field paths.
    assert!(get_fields(&FILE_EVENT_V2, &["@timestamp"], true).is_err());

    let values: Vec<(String, Value)> = iter_model_formatted(
        &record,
        &["timestamp", "event.inserted", "risk.indicators"],
        true,
        Some(RenderHint::Table),
    )
    .unwrap()
    .collect::<Result<_, _>>()
    .unwrap();

    assert_eq!(
        values,
        vec![
            ("timestamp".to_string(), Value::from("2020-10-27T15:16:05.369203Z")),
            ("event.inserted".to_string(), Value::from("2020-10-27T15:16:06Z")),
            (
                "risk.indicators".to_string(),
                Value::List(vec![Value::from("Browser upload: 5")])
            ),
        ]
    );
}
