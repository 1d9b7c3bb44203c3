//! Shared helpers for CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use qrelay_adapter_dryrun::DryRunBackend;
use qrelay_hal::{Backend, BackendConfig, BackendRegistry};
use qrelay_protocol::{Arm, BarrierScope, ExperimentConfig, ExperimentKind};
use qrelay_topology::{CouplingGraph, DevicePreset};

/// Device used when neither `--topology` nor `--device` is given.
pub const DEFAULT_DEVICE: &str = "heavy-hex:7x15";

/// Where the coupling graph comes from.
#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// Coupling-map JSON file
    #[arg(long, value_name = "FILE", conflicts_with = "device")]
    pub topology: Option<PathBuf>,

    /// Generated device (linear:N, ring:N, grid:RxC, heavy-hex:RxL)
    #[arg(long, value_name = "PRESET", default_value = DEFAULT_DEVICE)]
    pub device: String,
}

/// Options shared by every experiment command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// Experiment YAML file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Experiment name used for circuit names
    #[arg(long)]
    pub name: Option<String>,

    /// Arm to build (control, a protocol name, or name+lock); repeatable
    #[arg(long = "arm", value_name = "ARM")]
    pub arms: Vec<Arm>,

    /// Barrier placement (all, pair, none)
    #[arg(long)]
    pub barrier: Option<BarrierScope>,

    /// Shots per circuit
    #[arg(short, long, env = "QRELAY_SHOTS")]
    pub shots: Option<u32>,

    /// Optimization level (0-3)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub optimization_level: Option<u8>,

    /// Write one .qasm file per circuit into this directory
    #[arg(long, value_name = "DIR")]
    pub emit: Option<PathBuf>,

    /// Build and compile, but do not submit
    #[arg(long)]
    pub dry_run: bool,

    /// Backend to submit to
    #[arg(short, long, env = "QRELAY_BACKEND", default_value = "dry-run")]
    pub backend: String,

    /// Append the submission to ~/.qrelay/jobs.jsonl
    #[arg(long)]
    pub record: bool,
}

impl RunArgs {
    /// Overlay the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut ExperimentConfig) {
        if let Some(name) = &self.name {
            config.name = Some(name.clone());
        }
        if !self.arms.is_empty() {
            config.arms = Some(self.arms.clone());
        }
        if let Some(barrier) = self.barrier {
            config.barrier = barrier;
        }
        if let Some(shots) = self.shots {
            config.shots = shots;
        }
        if let Some(level) = self.optimization_level {
            config.optimization_level = level;
        }
    }
}

/// Build the experiment definition from `--config` or from flags.
///
/// `from_flags` is only called when no config file is given. A config file
/// must describe the same kind of experiment as the command.
pub fn resolve_config(
    run: &RunArgs,
    kind: &str,
    from_flags: impl FnOnce() -> Result<ExperimentKind>,
) -> Result<ExperimentConfig> {
    let mut config = match &run.config {
        Some(path) => {
            let config = ExperimentConfig::from_yaml_file(path)
                .with_context(|| format!("Failed to load experiment: {}", path.display()))?;
            if config.kind.as_str() != kind {
                anyhow::bail!(
                    "{} describes a '{}' experiment, not '{kind}'",
                    path.display(),
                    config.kind.as_str()
                );
            }
            config
        }
        None => ExperimentConfig::new(from_flags()?),
    };
    run.apply(&mut config);
    Ok(config)
}

/// Unwrap a flag clap only guarantees when `--config` is absent.
pub fn required<T>(value: Option<T>, flag: &str) -> Result<T> {
    value.ok_or_else(|| anyhow::anyhow!("{flag} is required without --config"))
}

/// Load or generate the coupling graph.
pub fn load_device(args: &DeviceArgs) -> Result<CouplingGraph> {
    match &args.topology {
        Some(path) => CouplingGraph::from_json_file(path)
            .with_context(|| format!("Failed to load coupling map: {}", path.display())),
        None => {
            let preset: DevicePreset = args
                .device
                .parse()
                .with_context(|| format!("Invalid device preset: {}", args.device))?;
            Ok(preset.build()?.with_name(args.device.clone()))
        }
    }
}

/// Every backend the CLI can submit to.
pub fn registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register::<DryRunBackend>(
        "dry-run",
        "Validates batches and keeps the emitted QASM in memory",
    );
    registry
}

/// Create a backend on `graph`.
pub fn create_backend(name: &str, graph: &CouplingGraph) -> Result<Box<dyn Backend>> {
    let config = BackendConfig::new(name).with_device(graph.clone());
    registry()
        .create(name, config)
        .with_context(|| format!("Failed to create backend '{name}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrelay_protocol::ProjectionConfig;

    fn run_args() -> RunArgs {
        RunArgs {
            device: DeviceArgs {
                topology: None,
                device: DEFAULT_DEVICE.to_string(),
            },
            config: None,
            name: None,
            arms: Vec::new(),
            barrier: None,
            shots: None,
            optimization_level: None,
            emit: None,
            dry_run: false,
            backend: "dry-run".to_string(),
            record: false,
        }
    }

    fn projection() -> Result<ExperimentKind> {
        Ok(ExperimentKind::Projection(ProjectionConfig {
            source: 0,
            target: 1,
        }))
    }

    #[test]
    fn test_default_device() {
        let graph = load_device(&run_args().device).unwrap();
        assert_eq!(graph.num_qubits(), 129);
        assert_eq!(graph.name(), Some(DEFAULT_DEVICE));
    }

    #[test]
    fn test_bad_preset() {
        let mut args = run_args();
        args.device.device = "torus:4".into();
        assert!(load_device(&args.device).is_err());

        args.device.device = "grid:70000x70000".into();
        let err = load_device(&args.device).unwrap_err();
        assert!(format!("{err:#}").contains("exceeds the limit"));
    }

    #[test]
    fn test_flags_override_defaults() {
        let mut args = run_args();
        args.shots = Some(100);
        args.optimization_level = Some(3);
        args.arms = vec![Arm::control()];

        let config = resolve_config(&args, "projection", projection).unwrap();
        assert_eq!(config.shots, 100);
        assert_eq!(config.optimization_level, 3);
        assert_eq!(config.arms, Some(vec![Arm::control()]));
    }

    #[test]
    fn test_config_kind_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.yaml");
        std::fs::write(&path, "kind: relay\nsource: 0\ntarget: 3\n").unwrap();

        let mut args = run_args();
        args.config = Some(path);
        let err = resolve_config(&args, "projection", projection).unwrap_err();
        assert!(err.to_string().contains("'relay'"));
    }

    #[test]
    fn test_registry_has_dry_run() {
        let registry = registry();
        assert!(registry.contains("dry-run"));
        let backend = create_backend("dry-run", &CouplingGraph::linear(4)).unwrap();
        assert_eq!(backend.device().num_qubits(), 4);
        assert!(create_backend("cloud", &CouplingGraph::linear(4)).is_err());
    }
}
