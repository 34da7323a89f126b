//! Resource schemas for the incydr SDK.
//!
//! Each schema is a lazily built static table; records of a resource are
//! created with [`incydr_types::Record::from_json`] (API payloads) or read
//! back from CSV by the engine.

pub mod alerts;
pub mod enums;
pub mod file_events;
mod resource;

pub use alerts::{ALERT_DETAILS, ALERT_SUMMARY};
pub use file_events::FILE_EVENT_V2;
pub use resource::Resource;

use incydr_types::{Value, format_datetime};

/// Root encoder shared by response schemas: timestamps render as ISO 8601.
pub(crate) fn iso_datetime(value: &Value) -> Value {
    match value {
        Value::DateTime(dt) => Value::String(format_datetime(dt)),
        other => other.clone(),
    }
}
