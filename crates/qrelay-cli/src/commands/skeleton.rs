//! Skeleton command: star of couplings from a center qubit.

use anyhow::Result;
use clap::Args;

use qrelay_protocol::{ExperimentKind, SkeletonConfig};

use super::common::{RunArgs, required, resolve_config};
use super::experiment;

/// Arguments for `qrelay skeleton`.
#[derive(Args, Debug, Clone)]
pub struct SkeletonArgs {
    /// Ignited qubit
    #[arg(long, default_value_t = 0, conflicts_with = "config")]
    pub ignite: u32,

    /// Hub of the star
    #[arg(long, required_unless_present = "config", conflicts_with = "config")]
    pub center: Option<u32>,

    /// Qubits coupled to the center (comma-separated)
    #[arg(
        long,
        value_delimiter = ',',
        required_unless_present = "config",
        conflicts_with = "config"
    )]
    pub anchors: Vec<u32>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Execute the skeleton command.
pub async fn execute(args: &SkeletonArgs) -> Result<()> {
    let config = resolve_config(&args.run, "skeleton", || {
        Ok(ExperimentKind::Skeleton(SkeletonConfig {
            ignite: args.ignite,
            center: required(args.center, "--center")?,
            anchors: args.anchors.clone(),
        }))
    })?;
    experiment::execute(config, &args.run).await
}
