//! Path command: inspect the qubits an experiment would use.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use tracing::warn;

use qrelay_protocol::{
    EnduranceConfig, ExperimentConfig, ExperimentKind, LongPathHeuristic, RelayConfig,
};

use super::common::{DeviceArgs, load_device};

/// Arguments for `qrelay path`.
///
/// With `--source` and `--target` this is a shortest-path query; without
/// them it searches for a long path.
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// Start of a shortest path
    #[arg(long, requires = "target")]
    pub source: Option<u32>,

    /// End of a shortest path
    #[arg(long, requires = "source")]
    pub target: Option<u32>,

    /// End to use when the target is unreachable
    #[arg(long, requires = "target")]
    pub fallback_target: Option<u32>,

    /// Long-path heuristic (greedy, lookahead, random)
    #[arg(long, default_value = "greedy", conflicts_with = "source")]
    pub heuristic: LongPathHeuristic,

    /// Warn when a long path has fewer qubits than this
    #[arg(long, default_value_t = 50)]
    pub min_path_len: usize,

    /// Highest degree of a long path's start qubit
    #[arg(long, default_value_t = 2)]
    pub max_start_degree: usize,

    /// Walks for the random heuristic
    #[arg(long, default_value_t = 64)]
    pub restarts: usize,

    /// Seed for the random heuristic
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl PathArgs {
    fn kind(&self) -> ExperimentKind {
        match (self.source, self.target) {
            (Some(source), Some(target)) => ExperimentKind::Relay(RelayConfig {
                source,
                target,
                fallback_target: self.fallback_target,
                path: None,
            }),
            _ => ExperimentKind::Endurance(EnduranceConfig {
                heuristic: self.heuristic,
                min_path_len: self.min_path_len,
                max_start_degree: self.max_start_degree,
                restarts: self.restarts,
                seed: self.seed,
            }),
        }
    }
}

/// Execute the path command.
pub fn execute(args: &PathArgs) -> Result<()> {
    let graph = load_device(&args.device)?;
    let config = ExperimentConfig::new(args.kind());
    let strategy = config
        .path_strategy()
        .context("No path strategy for this experiment")?;
    let path = strategy
        .select(&graph)
        .with_context(|| format!("{} search failed", strategy.name()))?;

    let short = matches!(config.kind, ExperimentKind::Endurance(_))
        && !path.meets_threshold(args.min_path_len);
    if short {
        warn!(
            "Path has {} qubits, below the threshold of {}",
            path.len(),
            args.min_path_len
        );
    }

    if args.json {
        let report = serde_json::json!({
            "device": graph.name(),
            "num_qubits": graph.num_qubits(),
            "strategy": strategy.name(),
            "path": path.as_slice(),
            "length": path.len(),
            "short": short,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} path on {} ({} qubits)",
        style("→").cyan().bold(),
        style(strategy.name()).green(),
        style(graph.name().unwrap_or("device")).yellow(),
        graph.num_qubits()
    );
    println!("  Length: {}", path.len());
    println!("  Path:   {path}");
    if short {
        println!(
            "  {} fewer than {} qubits",
            style("Warning:").yellow().bold(),
            args.min_path_len
        );
    }
    Ok(())
}
