//! Projection command: one protocol application between two qubits.

use anyhow::Result;
use clap::Args;

use qrelay_protocol::{ExperimentKind, ProjectionConfig};

use super::common::{RunArgs, required, resolve_config};
use super::experiment;

/// Arguments for `qrelay projection`.
#[derive(Args, Debug, Clone)]
pub struct ProjectionArgs {
    /// Ignited qubit
    #[arg(long, required_unless_present = "config", conflicts_with = "config")]
    pub source: Option<u32>,

    /// Receiving qubit
    #[arg(long, required_unless_present = "config", conflicts_with = "config")]
    pub target: Option<u32>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Execute the projection command.
pub async fn execute(args: &ProjectionArgs) -> Result<()> {
    let config = resolve_config(&args.run, "projection", || {
        Ok(ExperimentKind::Projection(ProjectionConfig {
            source: required(args.source, "--source")?,
            target: required(args.target, "--target")?,
        }))
    })?;
    experiment::execute(config, &args.run).await
}
