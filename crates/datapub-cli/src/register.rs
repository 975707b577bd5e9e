//! # Register Subcommand
//!
//! Mints a DOI (or refreshes registered metadata) through the policy and
//! the DataCite client. Registry credentials come from the environment;
//! the minted DOI can be written back into the resource file.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use datapub_core::{Actor, ActorRole};
use datapub_registry::{
    publish, DataCiteClient, RegistrationResult, RegistryMode, RegistrySettings,
};

use crate::load_resource;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Test,
    Production,
}

impl From<ModeArg> for RegistryMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Test => RegistryMode::Test,
            ModeArg::Production => RegistryMode::Production,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RoleArg {
    Administrator,
    Curator,
    TestPublisher,
}

impl From<RoleArg> for ActorRole {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Administrator => ActorRole::Administrator,
            RoleArg::Curator => ActorRole::Curator,
            RoleArg::TestPublisher => ActorRole::TestPublisher,
        }
    }
}

/// Arguments for the register subcommand.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Path to the resource aggregate JSON file.
    #[arg(long)]
    pub resource: PathBuf,

    /// Registry to target; falls back to the configured default. A
    /// test-restricted actor always ends up on the test registry.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Name of the acting operator, for the audit log.
    #[arg(long, default_value = "cli")]
    pub actor: String,

    /// Role of the acting operator.
    #[arg(long, value_enum, default_value = "curator")]
    pub role: RoleArg,

    /// Write the updated resource (with its minted DOI) back to the
    /// input file.
    #[arg(long)]
    pub save: bool,
}

pub async fn run(args: &RegisterArgs) -> anyhow::Result<()> {
    let mut resource = load_resource(&args.resource)?;

    let settings = RegistrySettings::from_env()?;
    let client = DataCiteClient::new(settings)?;
    let actor = Actor::new(args.actor.clone(), args.role.into());

    let result = publish(&client, &actor, &mut resource, args.mode.map(Into::into)).await?;

    match &result {
        RegistrationResult::Minted(outcome) => {
            tracing::info!(resource = %resource.id, doi = %outcome.doi, "DOI minted");
            println!("minted {}", outcome.doi);
        }
        RegistrationResult::Updated { doi } => {
            tracing::info!(resource = %resource.id, doi = %doi, "metadata updated");
            println!("updated metadata for {doi}");
        }
    }

    if args.save {
        let raw = serde_json::to_string_pretty(&resource)?;
        std::fs::write(&args.resource, raw)?;
        println!("saved {}", args.resource.display());
    }
    Ok(())
}
