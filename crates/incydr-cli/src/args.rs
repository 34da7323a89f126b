use crate::types::{LogLevel, ResourceArg, ShowFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "incydr")]
#[command(about = "Inspect, render and export Incydr resource records", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Config file (default: $INCYDR_CONFIG or the user config dir)"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the field paths of a resource
    Fields {
        resource: ResourceArg,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Field names or wildcard prefixes, e.g. event.id,file.*"
        )]
        include: Vec<String>,

        #[arg(long, help = "Flatten nested records into dot-notation paths")]
        flat: bool,

        #[arg(long, help = "Print each field's description next to its path")]
        describe: bool,
    },

    /// Render records from a JSON file (array or JSON lines)
    Show {
        resource: ResourceArg,

        input: PathBuf,

        #[arg(long, value_delimiter = ',')]
        include: Vec<String>,

        #[arg(long)]
        format: Option<ShowFormat>,
    },

    /// Validate records from a JSON file and write them as CSV
    Export {
        resource: ResourceArg,

        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, help = "Comma-separated column list, in output order")]
        columns: Option<String>,
    },

    /// Read records from CSV and print them as JSON lines
    Import {
        resource: ResourceArg,

        input: PathBuf,

        #[arg(long, help = "Emit API field names instead of canonical ones")]
        by_alias: bool,
    },

    /// Write arbitrary JSON objects as CSV, flattening nested objects
    Flatten {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, help = "Comma-separated top-level keys to keep")]
        columns: Option<String>,
    },
}
