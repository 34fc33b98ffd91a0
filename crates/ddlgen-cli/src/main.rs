//! ddlgen CLI - schema CSV to MySQL DDL generator

mod args;
mod config;
mod output;

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use ddlgen_core::RunContext;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing_subscriber::EnvFilter;

use crate::args::Args;
use crate::config::Config;
use crate::output::{write_artifacts, OutputFormatter};

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            return ExitCode::from(1);
        }
    };

    let subscriber = match log_subscriber(&config) {
        Ok(subscriber) => subscriber,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            return ExitCode::from(1);
        }
    };

    // The log sink lives exactly as long as the run
    tracing::subscriber::with_default(subscriber, || match run(&args, &config) {
        Ok(()) => {
            tracing::info!("Process completed.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {:?}", e);
            ExitCode::from(1)
        }
    })
}

fn load_config(args: &Args) -> Result<Config> {
    let config = if let Some(path) = &args.config {
        // Load from specified path
        Config::from_file(path)?
    } else {
        // Try to find ddlgen.toml
        Config::find_and_load()?.unwrap_or_default()
    };

    // Merge CLI args with config (CLI takes precedence)
    Ok(config.merge_with_args(args))
}

fn log_subscriber(config: &Config) -> Result<impl tracing::Subscriber + Send + Sync> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to open log file {}", config.log_file.display()))?;

    let level: tracing::Level = config
        .log_level
        .parse()
        .map_err(|_| miette::miette!("invalid log level '{}'", config.log_level))?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish())
}

fn run(args: &Args, config: &Config) -> Result<()> {
    let input = read_input(&args.csv)?;

    let mut ctx = RunContext::new(config.generator_settings())?;
    tracing::debug!(
        naming = ?ctx.settings.naming,
        profile = %ctx.settings.profile,
        "generating from {}",
        args.csv.display()
    );

    let (schema, diagnostics) = ddlgen_core::generate(&mut ctx, &input)?;

    let written = write_artifacts(&schema, &config.sql_output, &config.variables_output)?;

    OutputFormatter::new(config.output_format(), args.csv.display().to_string())
        .verbose(args.verbose > 0)
        .quiet(args.quiet)
        .print_summary(&schema, &written, &diagnostics);

    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("error processing CSV file {}", path.display()))
}
