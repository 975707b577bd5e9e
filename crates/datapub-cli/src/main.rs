//! # datapub CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Research-data publishing toolchain.
///
/// Validates metadata against the DataCite 4.6 schema, produces JSON and
/// XML exports, and registers DOIs with the DataCite registry.
#[derive(Parser, Debug)]
#[command(name = "datapub", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Check a resource against the DataCite schema.
    Validate(datapub_cli::validate::ValidateArgs),
    /// Produce a validated DataCite JSON or XML export.
    Export(datapub_cli::export::ExportArgs),
    /// Mint a DOI or refresh registered metadata.
    Register(datapub_cli::register::RegisterArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => datapub_cli::validate::run(&args),
        Commands::Export(args) => datapub_cli::export::run(&args),
        Commands::Register(args) => datapub_cli::register::run(&args).await,
    }
}
