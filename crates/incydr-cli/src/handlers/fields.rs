use anyhow::Result;
use incydr_engine::{get_fields, resolve};
use incydr_models::Resource;

pub fn handle(resource: Resource, include: &[String], flat: bool, describe: bool) -> Result<()> {
    let schema = resource.schema();
    let placeholder = schema.placeholder();

    for path in get_fields(schema, include, flat)? {
        if describe {
            let (_, field) = resolve(&placeholder, &path)?;
            println!("{}\t{}", path, field.description.unwrap_or(""));
        } else {
            println!("{}", path);
        }
    }

    Ok(())
}
