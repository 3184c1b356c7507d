//! A single normalization run: read JSON, normalize, write the chosen view.

use std::io::{Read, Write};

use anyhow::Context;
use fieldset_core::{FieldRegistry, Value};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{OutputFormat, RunConfig, View};

/// Reads one JSON document from `input`, normalizes it, and writes the
/// configured view to `output`.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON, the field is unknown, or
/// writing the output fails.
pub fn run<R: Read, W: Write>(
    config: &RunConfig,
    registry: &FieldRegistry,
    input: R,
    mut output: W,
) -> anyhow::Result<()> {
    let raw: Value = serde_json::from_reader(input).context("failed to parse input JSON")?;
    let mut set = config.value_set(registry)?;
    debug!(value_type = %set.value_type(), "normalizing input");
    set.set(raw);
    info!(
        value_type = %set.value_type(),
        records = set.records().map_or(0, <[_]>::len),
        keepalive = set.requires_keepalive_key(),
        "value set normalized"
    );

    match config.view {
        View::Projection => {
            write_value(&set.get().unwrap_or_default(), config.output, &mut output)?;
        }
        View::Records => {
            let records = Value::from(set.records().map(<[_]>::to_vec));
            write_value(&records, config.output, &mut output)?;
        }
        View::Payload => write_value(&set.to_payload(), config.output, &mut output)?,
    }
    output.flush().context("failed to flush output")?;
    Ok(())
}

fn write_value<T, W>(value: &T, format: OutputFormat, output: &mut W) -> anyhow::Result<()>
where
    T: Serialize,
    W: Write,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *output, value).context("failed to write JSON")?;
            output.write_all(b"\n").context("failed to write JSON")?;
        }
        OutputFormat::Msgpack => {
            rmp_serde::encode::write_named(output, value).context("failed to write MsgPack")?;
        }
    }
    Ok(())
}
