//! Relay command: shortest path between two qubits.

use anyhow::Result;
use clap::Args;

use qrelay_protocol::{ExperimentKind, RelayConfig};

use super::common::{RunArgs, required, resolve_config};
use super::experiment;

/// Arguments for `qrelay relay`.
#[derive(Args, Debug, Clone)]
pub struct RelayArgs {
    /// Ignited end of the relay
    #[arg(long, required_unless_present_any = ["config", "path"], conflicts_with = "config")]
    pub source: Option<u32>,

    /// Far end of the relay
    #[arg(long, required_unless_present_any = ["config", "path"], conflicts_with = "config")]
    pub target: Option<u32>,

    /// End to use when the target is unreachable
    #[arg(long, conflicts_with_all = ["config", "path"])]
    pub fallback_target: Option<u32>,

    /// Explicit path instead of a search (comma-separated qubits)
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["config", "source", "target"])]
    pub path: Option<Vec<u32>>,

    #[command(flatten)]
    pub run: RunArgs,
}

impl RelayArgs {
    fn kind(&self) -> Result<ExperimentKind> {
        let config = match &self.path {
            Some(path) => RelayConfig {
                source: path.first().copied().unwrap_or_default(),
                target: path.last().copied().unwrap_or_default(),
                fallback_target: None,
                path: Some(path.clone()),
            },
            None => RelayConfig {
                source: required(self.source, "--source")?,
                target: required(self.target, "--target")?,
                fallback_target: self.fallback_target,
                path: None,
            },
        };
        Ok(ExperimentKind::Relay(config))
    }
}

/// Execute the relay command.
pub async fn execute(args: &RelayArgs) -> Result<()> {
    let config = resolve_config(&args.run, "relay", || args.kind())?;
    experiment::execute(config, &args.run).await
}
