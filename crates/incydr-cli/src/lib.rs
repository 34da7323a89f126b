// incydr CLI - thin glue over the SDK engine.
//
// Commands never touch CSV or schema internals directly: field listing goes
// through the walker, rendering through formatted iteration, and every file
// format through the tabular codec.

mod args;
mod commands;
pub mod config;
mod handlers;
pub mod logging;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands};
pub use commands::run;
