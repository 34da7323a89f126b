use crate::coerce;
use crate::error::{FieldError, ValidationError};
use crate::row::Row;
use crate::schema::{FieldDef, Schema};
use crate::value::Value;
use serde::{Serialize, Serializer};

/// Concrete instance of a [`Schema`]. Values are stored in field declaration
/// order; absent optional fields hold [`Value::Null`].
#[derive(Debug, Clone)]
pub struct Record {
    schema: &'static Schema,
    values: Vec<Value>,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.values == other.values
    }
}

impl Record {
    /// Instance with every field absent.
    pub fn empty(schema: &'static Schema) -> Self {
        Self {
            schema,
            values: vec![Value::Null; schema.fields().len()],
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Value of the field named `name`, or `None` when the schema has no such
    /// field. Absent data is `Some(&Value::Null)`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema
            .lookup(name)
            .map(|(idx, _)| &self.values[idx])
    }

    /// Value at a declaration index obtained from [`Schema::lookup`].
    pub fn value_at(&self, idx: usize) -> &Value {
        &self.values[idx]
    }

    pub fn take(&mut self, idx: usize) -> Value {
        std::mem::take(&mut self.values[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldDef, &Value)> {
        self.schema.fields().iter().zip(self.values.iter())
    }

    /// Validate and build a record from a JSON object as returned by the API.
    /// Keys may be canonical field names or their API aliases; unknown keys
    /// are ignored. Every failing field is reported, not just the first.
    pub fn from_json(
        schema: &'static Schema,
        raw: &serde_json::Value,
    ) -> Result<Self, ValidationError> {
        let Some(object) = raw.as_object() else {
            return Err(ValidationError::new(
                schema.name(),
                vec![FieldError::new("__root__", "value is not a valid dict")],
            ));
        };

        let mut values = Vec::with_capacity(schema.fields().len());
        let mut errors = Vec::new();

        for field in schema.fields() {
            let raw_value = field
                .alias
                .and_then(|alias| object.get(alias))
                .or_else(|| object.get(field.name));

            let value = match raw_value {
                Some(raw) => coerce::from_json(field, raw),
                None => missing(field),
            };
            match value {
                Ok(value) => values.push(value),
                Err(field_errors) => {
                    errors.extend(field_errors);
                    values.push(Value::Null);
                }
            }
        }

        if errors.is_empty() {
            Ok(Self { schema, values })
        } else {
            Err(ValidationError::new(schema.name(), errors))
        }
    }

    /// Validate and build a record from one tabular row. Absent cells become
    /// absent fields; list and nested fields are read back from embedded JSON.
    pub fn from_row(schema: &'static Schema, row: &Row) -> Result<Self, ValidationError> {
        let mut values = Vec::with_capacity(schema.fields().len());
        let mut errors = Vec::new();

        for field in schema.fields() {
            let cell = row
                .get(field.name)
                .or_else(|| field.alias.and_then(|alias| row.get(alias)));

            let value = match cell {
                Some(text) => coerce::from_cell(field, text),
                None => missing(field),
            };
            match value {
                Ok(value) => values.push(value),
                Err(field_errors) => {
                    errors.extend(field_errors);
                    values.push(Value::Null);
                }
            }
        }

        if errors.is_empty() {
            Ok(Self { schema, values })
        } else {
            Err(ValidationError::new(schema.name(), errors))
        }
    }

    /// Canonical mapping of this record, keyed by field name (or API alias).
    pub fn to_json(&self, by_alias: bool) -> serde_json::Value {
        let map = self
            .iter()
            .map(|(field, value)| (field.key(by_alias).to_string(), value.to_json(by_alias)))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

fn missing(field: &FieldDef) -> Result<Value, Vec<FieldError>> {
    if field.required {
        Err(vec![FieldError::new(field.name, "field required")])
    } else {
        Ok(Value::Null)
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json(false).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use serde_json::json;
    use std::sync::Arc;

    static HASH: Lazy<Schema> = Lazy::new(|| {
        Schema::new(
            "Hash",
            vec![FieldDef::string("md5"), FieldDef::string("sha256")],
        )
    });

    static FILE: Lazy<Schema> = Lazy::new(|| {
        Schema::new(
            "File",
            vec![
                FieldDef::string("name").required(),
                FieldDef::integer("size_in_bytes").alias("sizeInBytes"),
                FieldDef::nested("hash", &HASH),
            ],
        )
    });

    #[test]
    fn test_from_json_accepts_aliases() {
        let record = Record::from_json(
            &FILE,
            &json!({"name": "ReadMe.md", "sizeInBytes": 12, "hash": {"md5": "abc"}}),
        )
        .unwrap();

        assert_eq!(record.get("size_in_bytes"), Some(&Value::Integer(12)));
        let hash = record.get("hash").and_then(Value::as_record).unwrap();
        assert_eq!(hash.get("md5"), Some(&Value::from("abc")));
        assert_eq!(hash.get("sha256"), Some(&Value::Null));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_from_json_collects_nested_errors() {
        let err = Record::from_json(&FILE, &json!({"sizeInBytes": "big", "hash": []}))
            .unwrap_err();

        assert_eq!(err.model, "File");
        let locs: Vec<String> = err.errors.iter().map(|e| e.loc.join(".")).collect();
        assert_eq!(locs, vec!["name", "size_in_bytes", "hash.__root__"]);
    }

    #[test]
    fn test_to_json_by_alias() {
        let record = Record::from_json(&FILE, &json!({"name": "a", "size_in_bytes": 1})).unwrap();
        assert_eq!(
            record.to_json(true),
            json!({"name": "a", "sizeInBytes": 1, "hash": null})
        );
        assert_eq!(
            record.to_json(false),
            json!({"name": "a", "size_in_bytes": 1, "hash": null})
        );
    }

    #[test]
    fn test_from_row_reads_nested_json_cells() {
        let columns: Arc<[String]> = ["name", "size_in_bytes", "hash"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let row = Row::new(
            columns,
            vec![
                Some("a.txt".to_string()),
                None,
                Some(r#"{"md5":"abc","sha256":null}"#.to_string()),
            ],
        );

        let record = Record::from_row(&FILE, &row).unwrap();
        assert_eq!(record.get("size_in_bytes"), Some(&Value::Null));
        assert_eq!(
            record.get("hash").and_then(Value::as_record).and_then(|h| h.get("md5")),
            Some(&Value::from("abc"))
        );
    }

    #[test]
    fn test_placeholder_is_all_absent() {
        let placeholder = FILE.placeholder();
        assert!(placeholder.iter().all(|(_, value)| value.is_null()));
    }
}
