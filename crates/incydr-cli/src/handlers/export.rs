use super::input::read_records;
use anyhow::{Context, Result};
use incydr_engine::{parse_columns, write_models_to_path};
use incydr_models::Resource;
use std::path::Path;

pub fn handle(
    resource: Resource,
    input: &Path,
    output: &Path,
    columns: Option<&str>,
) -> Result<()> {
    let records = read_records(resource.schema(), input)?;
    let columns = columns.map(parse_columns).unwrap_or_default();

    let written = write_models_to_path(&records, output, &columns)
        .with_context(|| format!("Failed to export to {}", output.display()))?;

    eprintln!("Wrote {} {} records to {}", written, resource, output.display());
    Ok(())
}
