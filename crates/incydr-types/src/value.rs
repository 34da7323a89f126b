use crate::record::Record;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Runtime value of a single record field.
///
/// `Null` stands for an absent optional field, both for data that was never
/// populated and for an empty CSV cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<Utc>),
    List(Vec<Value>),
    Record(Record),
}

/// Discriminant of [`Value`], used to look up a schema's default encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    DateTime,
    List,
    Record,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::List(_) => ValueKind::List,
            Value::Record(_) => ValueKind::Record,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Canonical JSON form. Records use their unaliased field names unless
    /// `by_alias` is set.
    pub fn to_json(&self, by_alias: bool) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(n) => serde_json::Value::from(*n),
            Value::Float(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::DateTime(dt) => serde_json::Value::String(format_datetime(dt)),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(|v| v.to_json(by_alias)).collect())
            }
            Value::Record(record) => record.to_json(by_alias),
        }
    }

    /// Text written into a CSV cell. Absent values become the empty string;
    /// lists and records are embedded as compact JSON.
    pub fn to_cell(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::List(_) | Value::Record(_) => self.to_json(false).to_string(),
            other => other.to_string(),
        }
    }
}

/// RFC 3339 with a `Z` suffix, the form the API itself emits.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::DateTime(dt) => write!(f, "{}", format_datetime(dt)),
            Value::List(_) | Value::Record(_) => write!(f, "{}", self.to_json(false)),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json(false).serialize(serializer)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_null_cell_is_empty_string() {
        assert_eq!(Value::Null.to_cell(), "");
    }

    #[test]
    fn test_scalar_cells() {
        assert_eq!(Value::Integer(42).to_cell(), "42");
        assert_eq!(Value::Bool(true).to_cell(), "true");
        assert_eq!(Value::from("a,b").to_cell(), "a,b");
    }

    #[test]
    fn test_datetime_cell_uses_rfc3339_utc() {
        let dt = Utc.with_ymd_and_hms(2020, 10, 27, 15, 16, 5).unwrap();
        assert_eq!(Value::DateTime(dt).to_cell(), "2020-10-27T15:16:05Z");
    }

    #[test]
    fn test_list_cell_is_json() {
        let list = Value::List(vec![Value::from("127.0.0.1"), Value::from("127.0.0.2")]);
        assert_eq!(list.to_cell(), r#"["127.0.0.1","127.0.0.2"]"#);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some(3i64)), Value::Integer(3));
    }
}
