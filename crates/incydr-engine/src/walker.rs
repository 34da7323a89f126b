//! Field path enumeration over schema tables.

use crate::{Error, Result};
use incydr_types::{FieldKind, Schema};

/// Marks an include entry as a prefix match.
pub const WILDCARD: char = '*';

/// Lazy depth-first enumeration of dotted field paths.
///
/// Only singular nested schemas are descended into; a list of nested records
/// is yielded as one path whose value is the whole list.
#[derive(Debug, Clone)]
pub struct FlattenFields {
    stack: Vec<Frame>,
}

#[derive(Debug, Clone)]
struct Frame {
    schema: &'static Schema,
    prefix: String,
    next: usize,
}

impl FlattenFields {
    fn new(schema: &'static Schema) -> Self {
        Self {
            stack: vec![Frame {
                schema,
                prefix: String::new(),
                next: 0,
            }],
        }
    }
}

impl Iterator for FlattenFields {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some(field) = frame.schema.fields().get(frame.next) else {
                self.stack.pop();
                continue;
            };
            frame.next += 1;

            let path = format!("{}{}", frame.prefix, field.name);
            match field.kind {
                FieldKind::Nested(child) => self.stack.push(Frame {
                    schema: child,
                    prefix: format!("{}.", path),
                    next: 0,
                }),
                FieldKind::Scalar(_) | FieldKind::NestedList(_) => return Some(path),
            }
        }
    }
}

/// Every field of `schema` and its singular sub-schemas as dot-notation paths,
/// in declaration order.
pub fn flatten_fields(schema: &'static Schema) -> FlattenFields {
    FlattenFields::new(schema)
}

/// Field paths produced by [`get_fields`].
#[derive(Debug, Clone)]
pub struct Fields {
    inner: FieldsInner,
}

#[derive(Debug, Clone)]
enum FieldsInner {
    Flat(FlattenFields),
    TopLevel {
        schema: &'static Schema,
        next: usize,
    },
    Selected(std::vec::IntoIter<String>),
}

impl Iterator for Fields {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match &mut self.inner {
            FieldsInner::Flat(walk) => walk.next(),
            FieldsInner::TopLevel { schema, next } => {
                let field = schema.fields().get(*next)?;
                *next += 1;
                Some(field.name.to_string())
            }
            FieldsInner::Selected(selected) => selected.next(),
        }
    }
}

fn walk(schema: &'static Schema, flat: bool) -> Fields {
    let inner = if flat {
        FieldsInner::Flat(flatten_fields(schema))
    } else {
        FieldsInner::TopLevel { schema, next: 0 }
    };
    Fields { inner }
}

/// Fields of `schema`, flattened to dotted leaves when `flat` is set.
///
/// An empty `include` yields every field in declaration order. Otherwise the
/// output follows the list's order rather than the schema's: an entry
/// containing `*` yields every field starting with the entry minus its
/// wildcards (in schema order), any other entry must match a field exactly.
/// An entry matching nothing fails with [`Error::NoMatchingField`] before
/// anything is yielded.
pub fn get_fields<S: AsRef<str>>(
    schema: &'static Schema,
    include: &[S],
    flat: bool,
) -> Result<Fields> {
    if include.is_empty() {
        return Ok(walk(schema, flat));
    }

    let all: Vec<String> = walk(schema, flat).collect();
    let mut selected = Vec::new();

    for entry in include {
        let entry = entry.as_ref();
        let before = selected.len();

        if entry.contains(WILDCARD) {
            let prefix = entry.replace(WILDCARD, "");
            selected.extend(all.iter().filter(|f| f.starts_with(&prefix)).cloned());
        } else if let Some(field) = all.iter().find(|f| *f == entry) {
            selected.push(field.clone());
        }

        if selected.len() == before {
            return Err(Error::NoMatchingField {
                pattern: entry.to_string(),
                schema: schema.name(),
                valid: all,
            });
        }
    }

    tracing::debug!(
        schema = schema.name(),
        count = selected.len(),
        "resolved include filter"
    );

    Ok(Fields {
        inner: FieldsInner::Selected(selected.into_iter()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use incydr_types::FieldDef;
    use once_cell::sync::Lazy;

    static CHILD: Lazy<Schema> = Lazy::new(|| {
        Schema::new(
            "Child",
            vec![FieldDef::string("field_1"), FieldDef::integer("field_2")],
        )
    });

    static PARENT: Lazy<Schema> = Lazy::new(|| {
        Schema::new(
            "Parent",
            vec![
                FieldDef::string("field"),
                FieldDef::nested("child", &CHILD),
                FieldDef::nested_list("children", &CHILD),
            ],
        )
    });

    #[test]
    fn test_flatten_fields_descends_singular_children_only() {
        let fields: Vec<String> = flatten_fields(&PARENT).collect();
        assert_eq!(
            fields,
            vec!["field", "child.field_1", "child.field_2", "children"]
        );
    }

    #[test]
    fn test_flatten_fields_is_restartable() {
        let mut first = flatten_fields(&PARENT);
        assert_eq!(first.next().as_deref(), Some("field"));
        let second: Vec<String> = flatten_fields(&PARENT).collect();
        assert_eq!(second.len(), 4);
    }

    #[test]
    fn test_get_fields_top_level_without_flat() {
        let fields: Vec<String> = get_fields::<&str>(&PARENT, &[], false).unwrap().collect();
        assert_eq!(fields, vec!["field", "child", "children"]);
    }

    #[test]
    fn test_empty_include_yields_everything() {
        let fields: Vec<String> = get_fields::<&str>(&PARENT, &[], true)
            .unwrap()
            .collect();
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn test_include_order_wins_over_schema_order() {
        let fields: Vec<String> = get_fields(&PARENT, &["child.*", "field"], true)
            .unwrap()
            .collect();
        assert_eq!(fields, vec!["child.field_1", "child.field_2", "field"]);
    }

    #[test]
    fn test_unmatched_exact_entry_fails() {
        let err = get_fields(&PARENT, &["field", "child.field_3"], true).unwrap_err();
        match err {
            Error::NoMatchingField {
                pattern,
                schema,
                valid,
            } => {
                assert_eq!(pattern, "child.field_3");
                assert_eq!(schema, "Parent");
                assert_eq!(valid.len(), 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unmatched_wildcard_fails() {
        let err = get_fields(&PARENT, &["nothing.*"], true).unwrap_err();
        assert!(matches!(err, Error::NoMatchingField { pattern, .. } if pattern == "nothing.*"));
    }

    #[test]
    fn test_nested_path_is_not_a_top_level_field() {
        assert!(get_fields(&PARENT, &["child.field_1"], false).is_err());
    }
}
