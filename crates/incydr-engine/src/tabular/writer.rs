use crate::{Error, Result};
use incydr_types::{Record, Schema};
use serde_json::{Map, Value as Json};
use std::borrow::Borrow;
use std::fs::File;
use std::io;
use std::iter;
use std::path::Path;

/// Write records as CSV: header first, then one row per record.
///
/// Columns are every field of the first record's schema in declaration order,
/// or `columns` (in the given order) when non-empty. Cells hold the record's
/// canonical unaliased values; absent values are written as empty cells.
/// Returns the number of data rows written.
pub fn write_models_to_csv<I, W, S>(records: I, sink: W, columns: &[S]) -> Result<usize>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
    W: io::Write,
    S: AsRef<str>,
{
    let mut records = records.into_iter();
    let first = records.next().ok_or(Error::EmptyInput)?;
    let schema = first.borrow().schema();
    let header = model_header(schema, columns)?;
    tracing::debug!(schema = schema.name(), columns = header.len(), "writing records");

    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(&header)?;

    let mut written = 0;
    for record in iter::once(first).chain(records) {
        let record = record.borrow();
        let mut cells = Vec::with_capacity(header.len());
        for column in &header {
            let value = record
                .get(column)
                .ok_or_else(|| unknown_column(record.schema(), column))?;
            cells.push(value.to_cell());
        }
        writer.write_record(&cells)?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}

/// [`write_models_to_csv`] into a file created for the duration of the write.
/// Nothing is created when `records` is empty or a column is unknown.
pub fn write_models_to_path<I, S>(
    records: I,
    path: impl AsRef<Path>,
    columns: &[S],
) -> Result<usize>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
    S: AsRef<str>,
{
    let mut records = records.into_iter().peekable();
    let Some(first) = records.peek() else {
        return Err(Error::EmptyInput);
    };
    model_header(first.borrow().schema(), columns)?;
    let file = File::create(path.as_ref())?;
    write_models_to_csv(records, file, columns)
}

/// Every field of `schema` in declaration order, or `columns` after checking
/// each one names a top-level field.
fn model_header<'c, S: AsRef<str>>(
    schema: &'static Schema,
    columns: &'c [S],
) -> Result<Vec<&'c str>> {
    if columns.is_empty() {
        return Ok(schema.fields().iter().map(|f| f.name).collect());
    }
    columns
        .iter()
        .map(|c| {
            let c = c.as_ref();
            match schema.lookup(c) {
                Some(_) => Ok(c),
                None => Err(unknown_column(schema, c).into()),
            }
        })
        .collect()
}

fn unknown_column(schema: &'static Schema, column: &str) -> incydr_types::Error {
    incydr_types::Error::UnknownField {
        schema: schema.name(),
        field: column.to_string(),
    }
}

/// Write raw mappings as CSV.
///
/// Each mapping is first restricted to `columns` (top-level keys, when
/// non-empty), then nested objects are flattened to dotted keys. The header is
/// the flattened key set of the first mapping and every later row is written
/// against that same header; keys it lacks become empty cells. A first mapping
/// that flattens to no keys at all is [`Error::EmptyInput`].
pub fn write_dict_to_csv<I, W, S>(rows: I, sink: W, columns: &[S]) -> Result<usize>
where
    I: IntoIterator,
    I::Item: Borrow<Map<String, Json>>,
    W: io::Write,
    S: AsRef<str>,
{
    let mut rows = rows.into_iter();
    let first = rows.next().ok_or(Error::EmptyInput)?;
    let header = dict_header(first.borrow(), columns)?;

    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(&header)?;

    let mut written = 0;
    for row in iter::once(first).chain(rows) {
        let flat = flatten_mapping(&project(row.borrow(), columns));
        writer.write_record(header.iter().map(|key| json_cell(flat.get(key))))?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}

/// [`write_dict_to_csv`] into a file created for the duration of the write.
/// Nothing is created when `rows` is empty or the first row has no columns.
pub fn write_dict_to_path<I, S>(
    rows: I,
    path: impl AsRef<Path>,
    columns: &[S],
) -> Result<usize>
where
    I: IntoIterator,
    I::Item: Borrow<Map<String, Json>>,
    S: AsRef<str>,
{
    let mut rows = rows.into_iter().peekable();
    let Some(first) = rows.peek() else {
        return Err(Error::EmptyInput);
    };
    dict_header(first.borrow(), columns)?;
    let file = File::create(path.as_ref())?;
    write_dict_to_csv(rows, file, columns)
}

fn dict_header<S: AsRef<str>>(first: &Map<String, Json>, columns: &[S]) -> Result<Vec<String>> {
    let header: Vec<String> = flatten_mapping(&project(first, columns))
        .keys()
        .cloned()
        .collect();
    if header.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(header)
}

/// Split a comma-separated column list, trimming whitespace around names.
pub fn parse_columns(columns: &str) -> Vec<String> {
    columns
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

fn project<S: AsRef<str>>(mapping: &Map<String, Json>, columns: &[S]) -> Map<String, Json> {
    if columns.is_empty() {
        return mapping.clone();
    }
    columns
        .iter()
        .map(|c| {
            let c = c.as_ref();
            (c.to_string(), mapping.get(c).cloned().unwrap_or(Json::Null))
        })
        .collect()
}

/// Flatten nested objects into dotted keys. Arrays are leaves, like lists of
/// nested records in the schema walker.
pub fn flatten_mapping(mapping: &Map<String, Json>) -> Map<String, Json> {
    let mut flat = Map::new();
    flatten_into(&mut flat, "", mapping);
    flat
}

fn flatten_into(flat: &mut Map<String, Json>, prefix: &str, mapping: &Map<String, Json>) {
    for (key, value) in mapping {
        let path = format!("{}{}", prefix, key);
        match value {
            Json::Object(child) => flatten_into(flat, &format!("{}.", path), child),
            other => {
                flat.insert(path, other.clone());
            }
        }
    }
}

fn json_cell(value: Option<&Json>) -> String {
    match value {
        None | Some(Json::Null) => String::new(),
        Some(Json::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
