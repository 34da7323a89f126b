use super::args::{Cli, Commands};
use super::handlers;
use crate::config::Config;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Fields {
            resource,
            include,
            flat,
            describe,
        } => handlers::fields::handle(resource.resource(), &include, flat, describe),

        Commands::Show {
            resource,
            input,
            include,
            format,
        } => {
            let resource = resource.resource();
            let include = config.include_for(resource, include);
            let format = format.or(config.output.format).unwrap_or_default();
            handlers::show::handle(resource, &input, &include, format)
        }

        Commands::Export {
            resource,
            input,
            output,
            columns,
        } => {
            let resource = resource.resource();
            let columns = config.columns_for(resource, columns);
            handlers::export::handle(resource, &input, &output, columns.as_deref())
        }

        Commands::Import {
            resource,
            input,
            by_alias,
        } => handlers::import::handle(resource.resource(), &input, by_alias),

        Commands::Flatten {
            input,
            output,
            columns,
        } => handlers::flatten::handle(&input, &output, columns.as_deref()),
    }
}
