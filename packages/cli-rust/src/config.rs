//! Command-line arguments and the run configuration derived from them.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use fieldset_core::{FieldRegistry, PropertySchema, ValueSet, ValueType};

/// Raw command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fieldset",
    version,
    about = "Normalize field input into value-set records"
)]
pub struct CliArgs {
    /// Value type: single_value, multiple_values, multiple_properties, value_set.
    #[arg(long = "type", env = "FIELDSET_TYPE", conflicts_with = "field")]
    pub value_type: Option<String>,

    /// Registered field kind (checkbox, select, set, ...).
    #[arg(long, env = "FIELDSET_FIELD")]
    pub field: Option<String>,

    /// Additional property with its default value. Repeatable.
    #[arg(long = "property", value_name = "NAME=DEFAULT", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Print the normalized records instead of the projected value.
    #[arg(long, conflicts_with = "payload")]
    pub records: bool,

    /// Print the full storage payload (value type, keepalive flag, records).
    #[arg(long)]
    pub payload: bool,

    #[arg(long, value_enum, env = "FIELDSET_OUTPUT", default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Log filter directive, e.g. `debug` or `fieldset_core=trace`.
    #[arg(long, env = "FIELDSET_LOG", default_value = "warn")]
    pub log_level: String,

    #[arg(long, value_enum, env = "FIELDSET_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Input JSON file. Reads stdin when omitted.
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Msgpack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// What part of the normalized value set is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Projection,
    Records,
    Payload,
}

/// Where the value set's type and schema come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    ValueType(ValueType),
    Field(String),
}

/// Logging configuration for the CLI process.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Validated configuration for a single normalization run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: SchemaSource,
    /// Properties merged over the field's or value type's schema.
    pub properties: Vec<(String, String)>,
    pub view: View,
    pub output: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source: SchemaSource::ValueType(ValueType::SingleValue),
            properties: Vec::new(),
            view: View::Projection,
            output: OutputFormat::Json,
        }
    }
}

impl RunConfig {
    /// Builds the value set the input is normalized into.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured field is not registered.
    pub fn value_set(&self, registry: &FieldRegistry) -> anyhow::Result<ValueSet> {
        let extra = self
            .properties
            .iter()
            .map(|(name, default)| (name.as_str(), default.as_str()));
        let set = match &self.source {
            SchemaSource::ValueType(value_type) => ValueSet::with_properties(*value_type, extra),
            SchemaSource::Field(name) => {
                let definition = registry
                    .get(name)
                    .with_context(|| format!("unknown field kind: {name:?}"))?;
                let schema = PropertySchema::new(definition.properties.iter().chain(extra));
                ValueSet::with_schema(definition.value_type, schema)
            }
        };
        Ok(set)
    }
}

impl CliArgs {
    /// Splits the arguments into run and logging configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `--type` nor `--field` is given, or the
    /// value type name is not recognized.
    pub fn into_configs(self) -> anyhow::Result<(RunConfig, LogConfig)> {
        let source = match (self.value_type, self.field) {
            (Some(name), _) => SchemaSource::ValueType(
                name.parse()
                    .with_context(|| format!("invalid --type {name:?}"))?,
            ),
            (None, Some(field)) => SchemaSource::Field(field),
            (None, None) => bail!("one of --type or --field is required"),
        };
        let view = if self.payload {
            View::Payload
        } else if self.records {
            View::Records
        } else {
            View::Projection
        };
        let run = RunConfig {
            source,
            properties: self.properties,
            view,
            output: self.output,
        };
        let log = LogConfig {
            filter: self.log_level,
            format: self.log_format,
        };
        Ok((run, log))
    }
}

fn parse_property(s: &str) -> Result<(String, String), String> {
    let (name, default) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=DEFAULT, got {s:?}"))?;
    if name.is_empty() {
        return Err("property name must not be empty".to_string());
    }
    Ok((name.to_string(), default.to_string()))
}
