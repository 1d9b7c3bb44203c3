//! YAML experiment definitions.
//!
//! Qubit numbers are configuration, never literals in the assembly code. A
//! definition names the experiment kind, its qubits, and optionally the arms
//! and run parameters:
//!
//! ```yaml
//! name: verdict
//! kind: relay
//! source: 0
//! target: 126
//! fallback_target: 120
//! shots: 4000
//! optimization_level: 1
//! ```

use std::path::Path as FsPath;

use qrelay_ir::Circuit;
use qrelay_topology::{
    CouplingGraph, GreedyLongest, LookaheadGreedy, Path, PathStrategy, RandomizedGreedy,
    ShortestPath,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::arm::Arm;
use crate::error::{AssemblyError, AssemblyResult};
use crate::experiment::{
    BarrierScope, Experiment, ProjectionExperiment, RelayExperiment, SkeletonExperiment,
};

fn default_shots() -> u32 {
    4000
}

fn default_optimization_level() -> u8 {
    1
}

fn default_min_path_len() -> usize {
    50
}

fn default_max_start_degree() -> usize {
    2
}

fn default_restarts() -> usize {
    64
}

/// Heuristic used to find a long path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LongPathHeuristic {
    /// [`GreedyLongest`].
    #[default]
    Greedy,
    /// [`LookaheadGreedy`].
    Lookahead,
    /// [`RandomizedGreedy`].
    Random,
}

impl std::str::FromStr for LongPathHeuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "greedy" => Ok(LongPathHeuristic::Greedy),
            "lookahead" => Ok(LongPathHeuristic::Lookahead),
            "random" => Ok(LongPathHeuristic::Random),
            _ => Err(format!(
                "unknown heuristic '{s}' (expected greedy, lookahead or random)"
            )),
        }
    }
}

/// Shortest-path relay between two named qubits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Ignited end of the relay.
    pub source: u32,
    /// Far end of the relay.
    pub target: u32,
    /// End to use when `target` is unreachable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_target: Option<u32>,
    /// Explicit path, used instead of a search when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<u32>>,
}

/// Relay along the longest path a heuristic can find.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnduranceConfig {
    /// Path heuristic.
    #[serde(default)]
    pub heuristic: LongPathHeuristic,
    /// Warn when the path has fewer qubits than this.
    #[serde(default = "default_min_path_len")]
    pub min_path_len: usize,
    /// Highest degree of a start qubit.
    #[serde(default = "default_max_start_degree")]
    pub max_start_degree: usize,
    /// Walks for the random heuristic.
    #[serde(default = "default_restarts")]
    pub restarts: usize,
    /// Seed for the random heuristic.
    #[serde(default)]
    pub seed: u64,
}

impl Default for EnduranceConfig {
    fn default() -> Self {
        Self {
            heuristic: LongPathHeuristic::default(),
            min_path_len: default_min_path_len(),
            max_start_degree: default_max_start_degree(),
            restarts: default_restarts(),
            seed: 0,
        }
    }
}

/// Star of couplings from a center to anchors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkeletonConfig {
    /// Ignited qubit.
    #[serde(default)]
    pub ignite: u32,
    /// Hub of the star.
    pub center: u32,
    /// Qubits coupled to the center, in order.
    pub anchors: Vec<u32>,
}

/// One protocol application between two qubits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Ignited qubit.
    pub source: u32,
    /// Receiving qubit.
    pub target: u32,
}

/// The experiment shape and its qubits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ExperimentKind {
    /// See [`RelayConfig`].
    Relay(RelayConfig),
    /// See [`EnduranceConfig`].
    Endurance(EnduranceConfig),
    /// See [`SkeletonConfig`].
    Skeleton(SkeletonConfig),
    /// See [`ProjectionConfig`].
    Projection(ProjectionConfig),
}

impl ExperimentKind {
    /// The kind's configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperimentKind::Relay(_) => "relay",
            ExperimentKind::Endurance(_) => "endurance",
            ExperimentKind::Skeleton(_) => "skeleton",
            ExperimentKind::Projection(_) => "projection",
        }
    }
}

/// A complete experiment definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Experiment name; defaults to the kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Shape and qubits.
    #[serde(flatten)]
    pub kind: ExperimentKind,
    /// Arms to build; the experiment's defaults when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arms: Option<Vec<Arm>>,
    /// Barrier placement for relays.
    #[serde(default)]
    pub barrier: BarrierScope,
    /// Shots per circuit.
    #[serde(default = "default_shots")]
    pub shots: u32,
    /// Compiler optimization level.
    #[serde(default = "default_optimization_level")]
    pub optimization_level: u8,
}

/// Circuits ready for compilation, one per arm.
#[derive(Debug, Clone)]
pub struct Batch {
    /// Experiment name.
    pub name: String,
    /// The arms, in circuit order.
    pub arms: Vec<Arm>,
    /// One circuit per arm.
    pub circuits: Vec<Circuit>,
    /// The relay path, for path-based experiments.
    pub path: Option<Path>,
    /// Whether the relay path is below its length threshold.
    pub short_path: bool,
}

impl ExperimentConfig {
    /// A definition with default run parameters.
    pub fn new(kind: ExperimentKind) -> Self {
        Self {
            name: None,
            kind,
            arms: None,
            barrier: BarrierScope::default(),
            shots: default_shots(),
            optimization_level: default_optimization_level(),
        }
    }

    /// Parse a YAML definition.
    pub fn from_yaml_str(yaml: &str) -> AssemblyResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Read a YAML definition from disk.
    pub fn from_yaml_file(path: impl AsRef<FsPath>) -> AssemblyResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Serialize as YAML.
    pub fn to_yaml_string(&self) -> AssemblyResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    fn check(&self) -> AssemblyResult<()> {
        if self.shots == 0 {
            return Err(AssemblyError::InvalidConfig("shots must be positive".into()));
        }
        if self.optimization_level > 3 {
            return Err(AssemblyError::InvalidConfig(format!(
                "optimization_level must be 0-3, got {}",
                self.optimization_level
            )));
        }
        if matches!(&self.arms, Some(arms) if arms.is_empty()) {
            return Err(AssemblyError::NoArms(self.display_name().to_string()));
        }
        Ok(())
    }

    /// The configured name, or the kind.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.kind.as_str())
    }

    /// The path strategy for path-based experiments.
    pub fn path_strategy(&self) -> Option<Box<dyn PathStrategy>> {
        match &self.kind {
            ExperimentKind::Relay(relay) => {
                let strategy = ShortestPath::new(relay.source, relay.target);
                Some(Box::new(match relay.fallback_target {
                    Some(fallback) => strategy.with_fallback(fallback),
                    None => strategy,
                }))
            }
            ExperimentKind::Endurance(endurance) => Some(match endurance.heuristic {
                LongPathHeuristic::Greedy => Box::new(GreedyLongest {
                    max_start_degree: endurance.max_start_degree,
                }),
                LongPathHeuristic::Lookahead => Box::new(LookaheadGreedy {
                    max_start_degree: endurance.max_start_degree,
                }),
                LongPathHeuristic::Random => Box::new(RandomizedGreedy {
                    restarts: endurance.restarts,
                    seed: endurance.seed,
                    max_start_degree: endurance.max_start_degree,
                }),
            }),
            ExperimentKind::Skeleton(_) | ExperimentKind::Projection(_) => None,
        }
    }

    fn select_path(&self, graph: &CouplingGraph) -> AssemblyResult<Option<Path>> {
        if let ExperimentKind::Relay(RelayConfig {
            path: Some(qubits), ..
        }) = &self.kind
        {
            let path = Path::new(qubits.clone())?;
            path.validate(graph)?;
            return Ok(Some(path));
        }
        match self.path_strategy() {
            Some(strategy) => {
                let path = strategy.select(graph)?;
                info!(
                    "{} path ({} qubits): {}",
                    strategy.name(),
                    path.len(),
                    path
                );
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }

    /// Select qubits on `graph` and build one circuit per arm.
    pub fn assemble(&self, graph: &CouplingGraph) -> AssemblyResult<Batch> {
        self.check()?;
        let register_size = graph.num_qubits();
        let name = self.display_name().to_string();
        let path = self.select_path(graph)?;

        let (arms, circuits, short_path) = match (&self.kind, &path) {
            (ExperimentKind::Relay(_) | ExperimentKind::Endurance(_), Some(path)) => {
                let mut relay = RelayExperiment::new(path.clone(), register_size)?
                    .with_name(name.clone())
                    .with_barrier(self.barrier);
                if let ExperimentKind::Endurance(endurance) = &self.kind {
                    relay = relay.with_min_path_len(endurance.min_path_len);
                }
                let (arms, circuits) = self.build_arms(&relay)?;
                (arms, circuits, relay.is_short())
            }
            (ExperimentKind::Skeleton(skeleton), _) => {
                let experiment = SkeletonExperiment::new(
                    skeleton.ignite,
                    skeleton.center,
                    skeleton.anchors.clone(),
                    register_size,
                )?;
                let (arms, circuits) = self.build_arms(&experiment)?;
                (arms, circuits, false)
            }
            (ExperimentKind::Projection(projection), _) => {
                let experiment =
                    ProjectionExperiment::new(projection.source, projection.target, register_size)?;
                let (arms, circuits) = self.build_arms(&experiment)?;
                (arms, circuits, false)
            }
            (ExperimentKind::Relay(_) | ExperimentKind::Endurance(_), None) => {
                return Err(AssemblyError::InvalidConfig(
                    "path-based experiment produced no path".into(),
                ));
            }
        };

        Ok(Batch {
            name,
            arms,
            circuits,
            path,
            short_path,
        })
    }

    fn build_arms(&self, experiment: &dyn Experiment) -> AssemblyResult<(Vec<Arm>, Vec<Circuit>)> {
        let arms = self
            .arms
            .clone()
            .unwrap_or_else(|| experiment.default_arms());
        let circuits = experiment.build_batch(&arms)?;
        Ok((arms, circuits))
    }
}
