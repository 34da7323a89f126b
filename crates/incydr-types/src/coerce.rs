// Field-level coercion from JSON payloads and CSV cell text into `Value`s.

use crate::error::FieldError;
use crate::record::Record;
use crate::schema::{FieldDef, FieldKind, ScalarType};
use crate::value::Value;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value as Json;

pub(crate) fn from_json(field: &FieldDef, raw: &Json) -> Result<Value, Vec<FieldError>> {
    if raw.is_null() {
        if field.required {
            return Err(vec![FieldError::new(
                field.name,
                "none is not an allowed value",
            )]);
        }
        return Ok(Value::Null);
    }

    match field.kind {
        FieldKind::Scalar(ty) => scalar_from_json(ty, raw)
            .and_then(|value| check_length(field, value))
            .map_err(|msg| vec![FieldError::new(field.name, msg)]),
        FieldKind::Nested(schema) => Record::from_json(schema, raw)
            .map(Value::Record)
            .map_err(|err| {
                err.errors
                    .into_iter()
                    .map(|e| e.nested_under(field.name))
                    .collect()
            }),
        FieldKind::NestedList(schema) => {
            let Some(items) = raw.as_array() else {
                return Err(vec![FieldError::new(field.name, "value is not a valid list")]);
            };

            let mut records = Vec::with_capacity(items.len());
            let mut errors = Vec::new();
            for (idx, item) in items.iter().enumerate() {
                match Record::from_json(schema, item) {
                    Ok(record) => records.push(Value::Record(record)),
                    Err(err) => errors.extend(err.errors.into_iter().map(|e| {
                        e.nested_under(&idx.to_string()).nested_under(field.name)
                    })),
                }
            }

            if errors.is_empty() {
                Ok(Value::List(records))
            } else {
                Err(errors)
            }
        }
    }
}

/// Cell text is never empty here; empty cells were already normalized to
/// absent by the reader. Lists and nested records travel as embedded JSON.
pub(crate) fn from_cell(field: &FieldDef, text: &str) -> Result<Value, Vec<FieldError>> {
    match field.kind {
        FieldKind::Scalar(ScalarType::StringList | ScalarType::IntegerList) => {
            let parsed = serde_json::from_str::<Json>(text)
                .map_err(|_| vec![FieldError::new(field.name, "value is not a valid list")])?;
            from_json(field, &parsed)
        }
        FieldKind::Scalar(_) => from_json(field, &Json::String(text.to_string())),
        FieldKind::Nested(_) => {
            let parsed = serde_json::from_str::<Json>(text)
                .map_err(|_| vec![FieldError::new(field.name, "value is not a valid dict")])?;
            from_json(field, &parsed)
        }
        FieldKind::NestedList(_) => {
            let parsed = serde_json::from_str::<Json>(text)
                .map_err(|_| vec![FieldError::new(field.name, "value is not a valid list")])?;
            from_json(field, &parsed)
        }
    }
}

fn scalar_from_json(ty: ScalarType, raw: &Json) -> Result<Value, String> {
    match ty {
        ScalarType::String => match raw {
            Json::String(s) => Ok(Value::String(s.clone())),
            Json::Number(n) => Ok(Value::String(n.to_string())),
            Json::Bool(b) => Ok(Value::String(b.to_string())),
            _ => Err("str type expected".to_string()),
        },
        ScalarType::Integer => integer_from_json(raw)
            .map(Value::Integer)
            .ok_or_else(|| "value is not a valid integer".to_string()),
        ScalarType::Float => match raw {
            Json::Number(n) => n.as_f64(),
            Json::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .map(Value::Float)
        .ok_or_else(|| "value is not a valid float".to_string()),
        ScalarType::Boolean => match raw {
            Json::Bool(b) => Some(*b),
            Json::Number(n) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Json::String(s) => parse_bool(s),
            _ => None,
        }
        .map(Value::Bool)
        .ok_or_else(|| "value could not be parsed to a boolean".to_string()),
        ScalarType::DateTime => match raw {
            Json::String(s) => parse_datetime(s),
            Json::Number(n) => n
                .as_i64()
                .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
            _ => None,
        }
        .map(Value::DateTime)
        .ok_or_else(|| "invalid datetime format".to_string()),
        ScalarType::Enum(def) => match raw {
            Json::String(s) if def.contains(s) => Ok(Value::String(s.clone())),
            Json::String(s) => Err(def.invalid_message(s)),
            other => Err(def.invalid_message(&other.to_string())),
        },
        ScalarType::StringList => {
            let items = raw.as_array().ok_or("value is not a valid list")?;
            items
                .iter()
                .map(|item| scalar_from_json(ScalarType::String, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        }
        ScalarType::IntegerList => {
            let items = raw.as_array().ok_or("value is not a valid list")?;
            items
                .iter()
                .map(|item| scalar_from_json(ScalarType::Integer, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        }
    }
}

fn integer_from_json(raw: &Json) -> Option<i64> {
    match raw {
        Json::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Json::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn check_length(field: &FieldDef, value: Value) -> Result<Value, String> {
    if let (Some(max), Value::String(s)) = (field.max_length, &value)
        && s.chars().count() > max
    {
        return Err(format!("ensure this value has at most {} characters", max));
    }
    Ok(value)
}

pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
