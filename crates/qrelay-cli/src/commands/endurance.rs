//! Endurance command: relay along the longest path a heuristic finds.

use anyhow::Result;
use clap::Args;

use qrelay_protocol::{EnduranceConfig, ExperimentKind, LongPathHeuristic};

use super::common::{RunArgs, resolve_config};
use super::experiment;

/// Arguments for `qrelay endurance`.
#[derive(Args, Debug, Clone)]
pub struct EnduranceArgs {
    /// Path heuristic (greedy, lookahead, random)
    #[arg(long, default_value = "greedy", conflicts_with = "config")]
    pub heuristic: LongPathHeuristic,

    /// Warn when the path has fewer qubits than this
    #[arg(long, default_value_t = 50, conflicts_with = "config")]
    pub min_path_len: usize,

    /// Highest degree of a start qubit
    #[arg(long, default_value_t = 2, conflicts_with = "config")]
    pub max_start_degree: usize,

    /// Walks for the random heuristic
    #[arg(long, default_value_t = 64, conflicts_with = "config")]
    pub restarts: usize,

    /// Seed for the random heuristic
    #[arg(long, default_value_t = 0, conflicts_with = "config")]
    pub seed: u64,

    #[command(flatten)]
    pub run: RunArgs,
}

impl EnduranceArgs {
    /// The path parameters as configuration.
    pub fn config(&self) -> EnduranceConfig {
        EnduranceConfig {
            heuristic: self.heuristic,
            min_path_len: self.min_path_len,
            max_start_degree: self.max_start_degree,
            restarts: self.restarts,
            seed: self.seed,
        }
    }
}

/// Execute the endurance command.
pub async fn execute(args: &EnduranceArgs) -> Result<()> {
    let config = resolve_config(&args.run, "endurance", || {
        Ok(ExperimentKind::Endurance(args.config()))
    })?;
    experiment::execute(config, &args.run).await
}
