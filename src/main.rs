//! docsmith CLI entrypoint
//! Splits `--key=value` context variables off the command line, parses the
//! rest and assembles the entry manifest to stdout.
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use docsmith::application::{AssembleCommand, split_context_args};
use docsmith::infrastructure::StdoutSink;
use docsmith::{AssemblyConfig, SubstitutionPolicy};

#[derive(Parser, Debug)]
#[command(name = "docsmith")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Any other --key=value argument is added to the initial context as a string variable."
)]
struct Cli {
    /// Entry manifest (or fragment) to assemble
    manifest: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail on placeholders with no value instead of substituting ""
    #[arg(long)]
    strict: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn known_flags() -> Vec<String> {
    Cli::command()
        .get_arguments()
        .filter_map(|arg| arg.get_long().map(str::to_string))
        .chain(["help".to_string(), "version".to_string()])
        .collect()
}

fn main() -> anyhow::Result<()> {
    let known = known_flags();
    let known: Vec<&str> = known.iter().map(String::as_str).collect();
    let invocation = split_context_args(std::env::args(), &known);
    let cli = Cli::parse_from(invocation.args);

    // stdout carries the document, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => AssemblyConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AssemblyConfig::default(),
    };
    if cli.strict {
        config.policy = SubstitutionPolicy::Strict;
    }

    info!(
        manifest = %cli.manifest.display(),
        variables = invocation.variables.len(),
        "Starting docsmith"
    );

    let command = AssembleCommand::new(cli.manifest.clone(), invocation.variables, config);
    command
        .execute(&mut StdoutSink::new())
        .with_context(|| format!("Failed to assemble {}", cli.manifest.display()))?;

    Ok(())
}
