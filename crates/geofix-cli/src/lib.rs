//! geofix CLI library
//!
//! Command-line and HTTP front ends for the `geofix` location sequencer.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;
pub mod server;

pub use commands::{
    Cli, ColorArg, Commands, DevicesArgs, InputArgs, RunArgs, ServeArgs, ToolArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{format_summary, summary_json, ProgressReporter};
pub use server::{router, ServerConfig, ServerConfigBuilder};
