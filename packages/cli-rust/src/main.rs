use std::fs::File;
use std::io::{self, BufReader, BufWriter};

use anyhow::Context;
use clap::Parser;
use fieldset_cli::{init_tracing, run, CliArgs};
use fieldset_core::FieldRegistry;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let input_path = args.input.clone();
    let (config, log_config) = args.into_configs()?;
    init_tracing(&log_config)?;

    let registry = FieldRegistry::with_builtins();
    let stdout = io::stdout();
    let output = BufWriter::new(stdout.lock());

    match input_path {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            run(&config, &registry, BufReader::new(file), output)
        }
        None => run(&config, &registry, io::stdin().lock(), output),
    }
}
