//! Core types for the incydr SDK: explicit schema metadata tables, the record
//! values that conform to them, and tabular rows.

mod coerce;
pub mod error;
pub mod record;
pub mod row;
pub mod schema;
pub mod value;

pub use error::{Error, FieldError, Result, ValidationError};
pub use record::Record;
pub use row::Row;
pub use schema::{EnumDef, FieldDef, FieldKind, RenderHint, ScalarType, Schema, Transform};
pub use value::{Value, ValueKind, format_datetime};
