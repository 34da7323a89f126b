use super::input::read_records;
use crate::presentation::model_as_card;
use crate::types::ShowFormat;
use anyhow::Result;
use incydr_engine::{get_fields, iter_model_formatted};
use incydr_models::Resource;
use is_terminal::IsTerminal;
use serde_json::{Map, Value as Json};
use std::path::Path;

pub fn handle(
    resource: Resource,
    input: &Path,
    include: &[String],
    format: ShowFormat,
) -> Result<()> {
    let schema = resource.schema();
    // Reject a bad include list even when the input holds no records.
    get_fields(schema, include, true)?;

    let records = read_records(schema, input)?;

    match format {
        ShowFormat::Card => {
            let styled = std::io::stdout().is_terminal();
            for (idx, record) in records.iter().enumerate() {
                if idx > 0 {
                    println!();
                }
                println!("{}", model_as_card(record, include, styled)?);
            }
        }
        ShowFormat::Json => {
            for record in &records {
                let mut object = Map::new();
                for item in iter_model_formatted(record, include, true, None)? {
                    let (name, value) = item?;
                    object.insert(name, value.to_json(false));
                }
                println!("{}", Json::Object(object));
            }
        }
    }

    Ok(())
}
