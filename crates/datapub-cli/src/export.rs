//! # Export Subcommand
//!
//! Produces a validated export file through the same service the
//! surrounding application uses, so the CLI can never write a payload
//! the service would refuse.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use datapub_core::{Actor, ActorRole};
use datapub_export::{ExportError, ExportFormat, ExportService, MemoryStore};

use crate::load_resource;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Json,
    Xml,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Xml => ExportFormat::Xml,
        }
    }
}

/// Arguments for the export subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Path to the resource aggregate JSON file.
    #[arg(long)]
    pub resource: PathBuf,

    /// Wire format to produce.
    #[arg(long, value_enum, default_value = "json")]
    pub format: FormatArg,

    /// Output file; defaults to the generated export filename in the
    /// current directory.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ExportArgs) -> anyhow::Result<()> {
    let resource = load_resource(&args.resource)?;
    let id = resource.id;

    let mut store = MemoryStore::new();
    store.insert(resource);
    let service = ExportService::new(store)?;

    let operator = Actor::new("cli", ActorRole::Administrator);
    let payload = match service.export(Some(&operator), &id, args.format.into()) {
        Ok(payload) => payload,
        Err(ExportError::SchemaValidation(report)) => {
            println!("{report}");
            anyhow::bail!("export refused: resource does not conform to the schema")
        }
        Err(other) => return Err(other.into()),
    };

    let target = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&payload.filename));
    std::fs::write(&target, &payload.bytes)?;
    tracing::info!(
        resource = %id,
        target = %target.display(),
        bytes = payload.bytes.len(),
        "export written"
    );
    for warning in &payload.warnings {
        println!("warning:{warning}");
    }
    println!("wrote {} ({} bytes)", target.display(), payload.bytes.len());
    Ok(())
}
