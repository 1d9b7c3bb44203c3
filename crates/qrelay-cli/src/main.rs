//! qrelay command-line interface.
//!
//! Builds phase relay experiments on a coupled qubit device, compiles them
//! with the qubits held in place, and submits the batch to a backend.
//!
//! ```text
//! qrelay relay --source 0 --target 126 --fallback-target 120
//! qrelay endurance --heuristic lookahead --emit out/ --dry-run
//! qrelay path --source 0 --target 126 --json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    backends, common::DeviceArgs, endurance, path, projection, relay, skeleton, version,
};

/// qrelay - phase relay experiments on coupled qubit devices
#[derive(Parser)]
#[command(name = "qrelay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Relay a phase along the shortest path between two qubits
    Relay(relay::RelayArgs),

    /// Relay a phase along the longest path a heuristic can find
    Endurance(endurance::EnduranceArgs),

    /// Couple a center qubit to a set of anchors
    Skeleton(skeleton::SkeletonArgs),

    /// Apply one protocol between two qubits
    Projection(projection::ProjectionArgs),

    /// Show the path an experiment would use
    Path(path::PathArgs),

    /// List available backends
    Backends {
        #[command(flatten)]
        device: DeviceArgs,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Relay(args) => relay::execute(&args).await,
        Commands::Endurance(args) => endurance::execute(&args).await,
        Commands::Skeleton(args) => skeleton::execute(&args).await,
        Commands::Projection(args) => projection::execute(&args).await,
        Commands::Path(args) => path::execute(&args),
        Commands::Backends { device } => backends::execute(&device),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use qrelay_protocol::{Arm, BarrierScope, LongPathHeuristic, ProtocolVariant};

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("qrelay").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_relay_flags() {
        let cli = parse(&[
            "relay",
            "--source",
            "0",
            "--target",
            "126",
            "--fallback-target",
            "120",
            "--arm",
            "armored+lock",
            "--arm",
            "control",
            "--barrier",
            "pair",
            "-s",
            "100",
        ])
        .unwrap();
        let Commands::Relay(args) = cli.command else {
            panic!("expected relay");
        };
        assert_eq!(args.source, Some(0));
        assert_eq!(args.fallback_target, Some(120));
        assert_eq!(
            args.run.arms,
            vec![Arm::new(ProtocolVariant::Armored).locked(), Arm::control()]
        );
        assert_eq!(args.run.barrier, Some(BarrierScope::Pair));
        assert_eq!(args.run.shots, Some(100));
        assert_eq!(args.run.backend, "dry-run");
        assert_eq!(args.run.device.device, "heavy-hex:7x15");
    }

    #[test]
    fn test_relay_explicit_path() {
        let cli = parse(&["relay", "--path", "0,1,2,3"]).unwrap();
        let Commands::Relay(args) = cli.command else {
            panic!("expected relay");
        };
        assert_eq!(args.path, Some(vec![0, 1, 2, 3]));
        assert!(parse(&["relay", "--path", "0,1", "--source", "0"]).is_err());
    }

    #[test]
    fn test_relay_needs_endpoints() {
        assert!(parse(&["relay", "--source", "0"]).is_err());
        assert!(parse(&["relay", "--config", "x.yaml"]).is_ok());
        assert!(parse(&["relay", "--config", "x.yaml", "--source", "1"]).is_err());
    }

    #[test]
    fn test_optimization_level_range() {
        assert!(parse(&["projection", "--source", "0", "--target", "1", "--optimization-level", "3"]).is_ok());
        assert!(parse(&["projection", "--source", "0", "--target", "1", "--optimization-level", "4"]).is_err());
    }

    #[test]
    fn test_topology_conflicts_with_device() {
        let args = ["path", "--topology", "map.json", "--device", "linear:5"];
        assert!(parse(&args).is_err());
    }

    #[test]
    fn test_endurance_defaults() {
        let cli = parse(&["endurance", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Endurance(args) = cli.command else {
            panic!("expected endurance");
        };
        assert_eq!(args.heuristic, LongPathHeuristic::Greedy);
        assert_eq!(args.min_path_len, 50);
        assert_eq!(args.max_start_degree, 2);
        assert_eq!(args.restarts, 64);
    }

    #[test]
    fn test_skeleton_anchors() {
        let cli = parse(&["skeleton", "--center", "5", "--anchors", "1,9,13"]).unwrap();
        let Commands::Skeleton(args) = cli.command else {
            panic!("expected skeleton");
        };
        assert_eq!(args.ignite, 0);
        assert_eq!(args.center, Some(5));
        assert_eq!(args.anchors, vec![1, 9, 13]);
    }

    #[test]
    fn test_bad_arm_rejected() {
        let args = ["projection", "--source", "0", "--target", "1", "--arm", "armored+fast"];
        assert!(parse(&args).is_err());
    }
}
