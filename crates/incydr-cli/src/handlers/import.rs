use anyhow::{Context, Result};
use incydr_engine::read_models_from_path;
use incydr_models::Resource;
use std::io::{self, Write};
use std::path::Path;

/// Print every valid row as a JSON line. A bad row does not stop the import;
/// it is reported once all valid rows are out.
pub fn handle(resource: Resource, input: &Path, by_alias: bool) -> Result<()> {
    let rows = read_models_from_path(resource.schema(), input)
        .with_context(|| format!("Failed to open {}", input.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut count = 0usize;

    for record in rows {
        let record = record?;
        writeln!(out, "{}", record.to_json(by_alias))?;
        count += 1;
    }

    tracing::info!(count, resource = %resource, "import finished");
    Ok(())
}
