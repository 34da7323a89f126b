use anyhow::{Context, Result};
use incydr_types::{Record, Schema};
use serde_json::{Map, Value as Json};
use std::path::Path;

/// JSON values from a file holding either one array or one value per line.
pub fn read_json_values(path: &Path) -> Result<Vec<Json>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    if content.trim_start().starts_with('[') {
        return serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON array in {}", path.display()));
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Invalid JSON on line {} of {}", idx + 1, path.display()))
        })
        .collect()
}

pub fn read_records(schema: &'static Schema, path: &Path) -> Result<Vec<Record>> {
    let values = read_json_values(path)?;
    tracing::debug!(count = values.len(), schema = schema.name(), "loaded JSON input");

    values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            Record::from_json(schema, value)
                .with_context(|| format!("Record {} of {} is invalid", idx + 1, path.display()))
        })
        .collect()
}

pub fn read_objects(path: &Path) -> Result<Vec<Map<String, Json>>> {
    read_json_values(path)?
        .into_iter()
        .enumerate()
        .map(|(idx, value)| match value {
            Json::Object(map) => Ok(map),
            _ => anyhow::bail!("Item {} of {} is not a JSON object", idx + 1, path.display()),
        })
        .collect()
}
