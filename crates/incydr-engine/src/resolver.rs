use crate::Result;
use incydr_types::{FieldDef, FieldKind, Record, Schema, Value};
use std::borrow::Cow;

/// Value at `path` in `record` together with the field's schema metadata.
///
/// When an optional sub-record along the path is absent, an all-absent
/// placeholder of the expected child schema stands in for it, so the metadata
/// lookup still succeeds and the returned value is [`Value::Null`]. Fails only
/// when a path component is not a field of the schema (or cannot be descended
/// into), never because data is missing.
pub fn get_field_value_and_info<'r, S: AsRef<str>>(
    record: &'r Record,
    path: &[S],
) -> Result<(Cow<'r, Value>, &'static FieldDef)> {
    let Some((last, parents)) = path.split_last() else {
        return Err(unknown_field(record.schema(), "").into());
    };

    let mut current: Cow<'r, Record> = Cow::Borrowed(record);
    for name in parents {
        let name = name.as_ref();
        let schema = current.schema();
        let (idx, field) = schema
            .lookup(name)
            .ok_or_else(|| unknown_field(schema, name))?;
        let FieldKind::Nested(child) = field.kind else {
            return Err(incydr_types::Error::NotNested {
                schema: schema.name(),
                field: name.to_string(),
            }
            .into());
        };

        current = match current {
            Cow::Borrowed(parent) => match parent.value_at(idx) {
                Value::Record(next) => Cow::Borrowed(next),
                _ => Cow::Owned(child.placeholder()),
            },
            Cow::Owned(_) => Cow::Owned(child.placeholder()),
        };
    }

    let last = last.as_ref();
    let schema = current.schema();
    let (idx, field) = schema
        .lookup(last)
        .ok_or_else(|| unknown_field(schema, last))?;

    let value = match current {
        Cow::Borrowed(parent) => Cow::Borrowed(parent.value_at(idx)),
        Cow::Owned(mut placeholder) => Cow::Owned(placeholder.take(idx)),
    };
    Ok((value, field))
}

/// [`get_field_value_and_info`] for a dot-joined path such as `"file.hash.md5"`.
pub fn resolve<'r>(
    record: &'r Record,
    path: &str,
) -> Result<(Cow<'r, Value>, &'static FieldDef)> {
    let components: Vec<&str> = path.split('.').collect();
    get_field_value_and_info(record, &components)
}

fn unknown_field(schema: &'static Schema, field: &str) -> incydr_types::Error {
    incydr_types::Error::UnknownField {
        schema: schema.name(),
        field: field.to_string(),
    }
}
