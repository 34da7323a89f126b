use super::input::read_objects;
use anyhow::{Context, Result};
use incydr_engine::{parse_columns, write_dict_to_path};
use std::path::Path;

pub fn handle(input: &Path, output: &Path, columns: Option<&str>) -> Result<()> {
    let rows = read_objects(input)?;
    let columns = columns.map(parse_columns).unwrap_or_default();

    let written = write_dict_to_path(&rows, output, &columns)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    eprintln!("Wrote {} rows to {}", written, output.display());
    Ok(())
}
