//! File event (v2) schemas.
//!
//! Every sub-record of [`FILE_EVENT_V2`] is optional except where the API
//! guarantees a value (`event.id`, `file.name`, the private IP lists).

use crate::enums::RISK_SEVERITY;
use crate::iso_datetime;
use incydr_types::{FieldDef, RenderHint, ScalarType, Schema, Value, ValueKind};
use once_cell::sync::Lazy;

pub static HASH: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "Hash",
        vec![
            FieldDef::string("md5")
                .describe("The MD5 hash of the file contents.")
                .example("a162591e78eb2c816a28907d3ac020f9"),
            FieldDef::string("md5_error")
                .alias("md5Error")
                .describe("Reason the MD5 hash is unavailable."),
            FieldDef::string("sha256")
                .describe("The SHA-256 hash of the file contents.")
                .example("ded96d69c63754472efc4aa86fed68d4e17784b38089851cfa84e699e48b4155"),
            FieldDef::string("sha256_error")
                .alias("sha256Error")
                .describe("Reason the SHA-256 hash is unavailable."),
        ],
    )
});

pub static FILE_CLASSIFICATION: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "FileClassification",
        vec![
            FieldDef::string("value")
                .describe("The classification value applied to the file.")
                .example("Classified"),
            FieldDef::string("vendor")
                .describe("The name of the vendor that classified the file."),
        ],
    )
});

pub static FILE: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "File",
        vec![
            FieldDef::string("category").example("Audio"),
            FieldDef::string("category_by_bytes")
                .alias("categoryByBytes")
                .example("Image"),
            FieldDef::string("category_by_extension")
                .alias("categoryByExtension")
                .example("Document"),
            FieldDef::nested_list("classifications", &FILE_CLASSIFICATION),
            FieldDef::string("cloud_drive_id").alias("cloudDriveId"),
            FieldDef::datetime("created")
                .describe("File creation timestamp as reported by the device's operating system."),
            FieldDef::string("directory")
                .describe("The file location on the user's device; a path forward or backslash.")
                .example("/Users/alix/Documents/"),
            FieldDef::string_list("directory_id").alias("directoryId"),
            FieldDef::nested("hash", &HASH).describe("Hash values of the file."),
            FieldDef::string("id").example("PUL5zWLRrdudiJZ1OCWw"),
            FieldDef::string("mime_type_by_bytes")
                .alias("mimeTypeByBytes")
                .example("text/csv"),
            FieldDef::string("mime_type_by_extension")
                .alias("mimeTypeByExtension")
                .example("audio/vorbis"),
            FieldDef::datetime("modified"),
            FieldDef::string("name")
                .required()
                .describe("The name of the file, including the file extension.")
                .example("ReadMe.md"),
            FieldDef::string("owner").example("ari.example"),
            FieldDef::integer("size_in_bytes")
                .alias("sizeInBytes")
                .describe("Size of the file in bytes."),
            FieldDef::string("url"),
        ],
    )
});

pub static TAB: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "Tab",
        vec![
            FieldDef::string("title").describe("The title of this app or browser tab."),
            FieldDef::string("title_error").alias("titleError"),
            FieldDef::string("url").describe("The URL of this browser tab."),
            FieldDef::string("url_error").alias("urlError"),
        ],
    )
});

pub static RELATED_EVENT: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "RelatedEvent",
        vec![
            FieldDef::datetime("agent_timestamp").alias("agentTimestamp"),
            FieldDef::string("event_action").alias("eventAction"),
            FieldDef::string("id"),
            FieldDef::string("source_category").alias("sourceCategory"),
            FieldDef::string("source_name").alias("sourceName"),
            FieldDef::nested_list("tabs", &TAB),
            FieldDef::string("user_email").alias("userEmail"),
        ],
    )
});

pub static EVENT: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "Event",
        vec![
            FieldDef::string("action")
                .describe("The type of file event observed.")
                .example("file-downloaded"),
            FieldDef::string("id")
                .required()
                .describe("The unique identifier for the event."),
            FieldDef::datetime("ingested")
                .describe("Date and time the event was initially received."),
            FieldDef::datetime("inserted")
                .describe("Date and time the event processing is completed."),
            FieldDef::string("observer")
                .describe("The data source that captured the file event.")
                .example("Endpoint"),
            FieldDef::nested_list("related_events", &RELATED_EVENT).alias("relatedEvents"),
            FieldDef::string_list("share_type")
                .alias("shareType")
                .describe("Sharing types added by this event."),
        ],
    )
});

pub static REMOVABLE_MEDIA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "RemovableMedia",
        vec![
            FieldDef::string("bus_type").alias("busType").example("USB 3.0 Bus"),
            FieldDef::integer("capacity")
                .describe("The capacity of the removable device in bytes.")
                .example("15631122432"),
            FieldDef::string("media_name").alias("mediaName").example("Cruzer Blade"),
            FieldDef::string("name").example("JUMPDRIVE"),
            FieldDef::string_list("partition_id").alias("partitionId"),
            FieldDef::string("serial_number").alias("serialNumber"),
            FieldDef::string("vendor").example("SanDisk"),
            FieldDef::string_list("volume_name").alias("volumeName"),
        ],
    )
});

pub static SOURCE_EMAIL: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "SourceEmail",
        vec![
            FieldDef::string("from")
                .describe("The display name of the sender, as it appears in the \"From\" field.")
                .example("ari@example.com"),
            FieldDef::string("sender")
                .describe("The address of the entity responsible for transmitting the message.")
                .example("ari@example.com"),
        ],
    )
});

pub static SOURCE: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "Source",
        vec![
            FieldDef::string("category")
                .describe("General category of where the file originated.")
                .example("Social Media"),
            FieldDef::string("domain").example("localhost"),
            FieldDef::string_list("domains"),
            FieldDef::nested("email", &SOURCE_EMAIL)
                .describe("Metadata about the email source."),
            FieldDef::string("ip").example("127.0.0.1"),
            FieldDef::string("name"),
            FieldDef::string("operating_system")
                .alias("operatingSystem")
                .example("Windows 10"),
            FieldDef::string_list("private_ip")
                .alias("privateIp")
                .required()
                .describe("The IP address of the user's device on your internal network."),
            FieldDef::nested("removable_media", &REMOVABLE_MEDIA)
                .alias("removableMedia")
                .describe("Metadata about the removable media source."),
            FieldDef::nested_list("tabs", &TAB)
                .describe("Metadata about the browser tab source.")
                .hint(RenderHint::Table, tab_urls),
        ],
    )
});

pub static DESTINATION_EMAIL: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "DestinationEmail",
        vec![
            FieldDef::string_list("recipients"),
            FieldDef::string("subject").example("Important business documents"),
        ],
    )
});

pub static DESTINATION_USER: Lazy<Schema> = Lazy::new(|| {
    Schema::new("DestinationUser", vec![FieldDef::string_list("email")])
});

pub static DESTINATION: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "Destination",
        vec![
            FieldDef::string("account_name").alias("accountName"),
            FieldDef::string("account_type")
                .alias("accountType")
                .example("BUSINESS"),
            FieldDef::string("category").example("Social Media"),
            FieldDef::string_list("domains"),
            FieldDef::nested("email", &DESTINATION_EMAIL),
            FieldDef::string("ip"),
            FieldDef::string("name"),
            FieldDef::string("operating_system").alias("operatingSystem"),
            FieldDef::string("print_job_name").alias("printJobName"),
            FieldDef::string("printer_name").alias("printerName"),
            FieldDef::string_list("private_ip").alias("privateIp").required(),
            FieldDef::nested("removable_media", &REMOVABLE_MEDIA).alias("removableMedia"),
            FieldDef::nested_list("tabs", &TAB).hint(RenderHint::Table, tab_urls),
            FieldDef::nested("user", &DESTINATION_USER),
        ],
    )
});

pub static PROCESS: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "Process",
        vec![
            FieldDef::string("executable").example("bash"),
            FieldDef::string("owner").example("root"),
        ],
    )
});

pub static RISK_INDICATOR: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "RiskIndicator",
        vec![
            FieldDef::string("name")
                .describe("Name of the risk indicator.")
                .example("Browser upload"),
            FieldDef::integer("weight")
                .describe("Configured weight of the risk indicator at the time this event was seen.")
                .example("5"),
        ],
    )
});

pub static RISK: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "Risk",
        vec![
            FieldDef::nested_list("indicators", &RISK_INDICATOR)
                .hint(RenderHint::Table, indicator_labels),
            FieldDef::integer("score").example("12"),
            FieldDef::enumeration("severity", &RISK_SEVERITY).example("CRITICAL"),
            FieldDef::string("trust_reason")
                .alias("trustReason")
                .example("TRUSTED_DOMAIN_BROWSER_URL"),
            FieldDef::boolean("trusted"),
        ],
    )
});

pub static USER: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "User",
        vec![
            FieldDef::string("device_uid")
                .alias("deviceUid")
                .describe("Unique identifier for the device."),
            FieldDef::string("email").example("cody@example.com"),
            FieldDef::string("id"),
        ],
    )
});

pub static FILE_EVENT_V2: Lazy<Schema> = Lazy::new(|| {
    Schema::new(
        "FileEventV2",
        vec![
            FieldDef::scalar("timestamp", ScalarType::DateTime)
                .alias("@timestamp")
                .describe("Date and time that the service on the device detected an event."),
            FieldDef::nested("destination", &DESTINATION)
                .describe("Metadata about the destination of the file event."),
            FieldDef::nested("event", &EVENT).describe("Summary information about the event."),
            FieldDef::nested("file", &FILE).describe("Metadata about the file for this event."),
            FieldDef::nested("process", &PROCESS),
            FieldDef::nested("risk", &RISK).describe("Risk factor metadata."),
            FieldDef::nested("source", &SOURCE)
                .describe("Metadata about the source of the file event."),
            FieldDef::nested("user", &USER),
        ],
    )
    .with_encoder(ValueKind::DateTime, iso_datetime)
});

fn tab_urls(value: &Value) -> Value {
    let Some(tabs) = value.as_list() else {
        return value.clone();
    };
    let urls = tabs
        .iter()
        .filter_map(Value::as_record)
        .map(|tab| {
            let url = tab.get("url").and_then(Value::as_str);
            let title = tab.get("title").and_then(Value::as_str);
            match (title, url) {
                (Some(title), Some(url)) => Value::String(format!("{} <{}>", title, url)),
                (None, Some(url)) => Value::String(url.to_string()),
                (Some(title), None) => Value::String(title.to_string()),
                (None, None) => Value::Null,
            }
        })
        .collect();
    Value::List(urls)
}

fn indicator_labels(value: &Value) -> Value {
    let Some(indicators) = value.as_list() else {
        return value.clone();
    };
    let labels = indicators
        .iter()
        .filter_map(Value::as_record)
        .map(|indicator| {
            let name = indicator.get("name").and_then(Value::as_str).unwrap_or("-");
            match indicator.get("weight").and_then(Value::as_i64) {
                Some(weight) => Value::String(format!("{}: {}", name, weight)),
                None => Value::String(name.to_string()),
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

    #[test]
    fn test_timestamp_accepts_api_alias() {
        let record = Record::from_json(
            &FILE_EVENT_V2,
            &json!({"@timestamp": "2020-10-27T15:16:05.369203Z", "event": {"id": "e1"}}),
        )
        .unwrap();
        assert!(matches!(record.get("timestamp"), Some(Value::DateTime(_))));
    }

    #[test]
    fn test_missing_private_ip_is_reported_under_source() {
        let err = Record::from_json(&FILE_EVENT_V2, &json!({"source": {"ip": "127.0.0.1"}}))
            .unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].loc, vec!["source", "private_ip"]);
    }

    #[test]
    fn test_indicator_labels() {
        let risk = Record::from_json(
            &RISK,
            &json!({"indicators": [{"name": "Browser upload", "weight": 5}, {"name": "Zip"}]}),
        )
        .unwrap();
        assert_eq!(
            indicator_labels(risk.get("indicators").unwrap()),
            Value::List(vec![Value::from("Browser upload: 5"), Value::from("Zip")])
        );
    }

    #[test]
    fn test_tab_urls() {
        let source = Record::from_json(
            &SOURCE,
            &json!({"privateIp": [], "tabs": [{"title": "Example", "url": "https://example.com/"}]}),
        )
        .unwrap();
        assert_eq!(
            tab_urls(source.get("tabs").unwrap()),
            Value::List(vec![Value::from("Example <https://example.com/>")])
        );
    }
}
