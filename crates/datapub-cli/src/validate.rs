//! # Validate Subcommand
//!
//! Runs both validation paths over a resource file without producing an
//! export: the JSON Schema check on the projected document and the XML
//! kernel contract check on the aggregate.

use std::path::PathBuf;

use clap::Args;
use datapub_export::project_json;
use datapub_schema::{kernel, SchemaValidator, SCHEMA_VERSION};

use crate::load_resource;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the resource aggregate JSON file.
    #[arg(long)]
    pub resource: PathBuf,
}

/// Exit code 1 when any blocking finding exists.
pub fn run(args: &ValidateArgs) -> anyhow::Result<()> {
    let resource = load_resource(&args.resource)?;

    let validator = SchemaValidator::new()?;
    let document = project_json(&resource);
    let schema_issues = validator.validate_export(&document);

    let check = kernel::check(&resource);

    if schema_issues.is_empty() && !check.is_fatal() {
        println!("valid against DataCite Schema {SCHEMA_VERSION}");
        for warning in &check.warnings {
            println!("warning:{warning}");
        }
        return Ok(());
    }

    if !schema_issues.is_empty() {
        println!("JSON export validation failed against DataCite Schema.");
        for issue in &schema_issues {
            println!("{issue}");
        }
    }
    if check.is_fatal() {
        println!("XML export validation failed against DataCite Schema.");
        for issue in &check.errors {
            println!("{issue}");
        }
    }
    anyhow::bail!("resource does not conform to DataCite Schema {SCHEMA_VERSION}")
}
