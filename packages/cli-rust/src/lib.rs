//! `fieldset` CLI — normalizes field input from JSON into value-set records.

pub mod config;
pub mod logging;
pub mod run;

pub use config::{CliArgs, LogConfig, OutputFormat, RunConfig, SchemaSource, View};
pub use logging::init_tracing;
pub use run::run;
