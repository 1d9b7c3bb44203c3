//! Experiment circuit assembly.
//!
//! Every experiment follows the same linear recipe: ignite a source qubit
//! with `x` then `h`, optionally lock its phase, apply the arm's protocol
//! along a set of pairs, and measure. The register always spans the whole
//! device so that logical qubit `i` is physical qubit `i` under an identity
//! layout.

use qrelay_ir::{Circuit, ClbitId, QubitId};
use qrelay_topology::Path;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::arm::Arm;
use crate::error::{AssemblyError, AssemblyResult};
use crate::protocol::{ProtocolApplier, QUARTER_PHASE};

/// Where barriers are placed after each protocol step of a relay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarrierScope {
    /// Across the whole register.
    #[default]
    All,
    /// Across the two qubits of the step.
    Pair,
    /// No barriers between steps.
    None,
}

impl std::str::FromStr for BarrierScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(BarrierScope::All),
            "pair" => Ok(BarrierScope::Pair),
            "none" => Ok(BarrierScope::None),
            _ => Err(format!("unknown barrier scope '{s}' (expected all, pair or none)")),
        }
    }
}

/// Something that builds one circuit per experimental arm.
pub trait Experiment {
    /// Name used as a prefix for circuit names.
    fn name(&self) -> &str;

    /// Arms used when none are configured.
    fn default_arms(&self) -> Vec<Arm>;

    /// Build the circuit for one arm.
    fn build(&self, arm: &Arm) -> AssemblyResult<Circuit>;

    /// Build one circuit per arm, in arm order.
    fn build_batch(&self, arms: &[Arm]) -> AssemblyResult<Vec<Circuit>> {
        if arms.is_empty() {
            return Err(AssemblyError::NoArms(self.name().to_string()));
        }
        arms.iter().map(|arm| self.build(arm)).collect()
    }
}

fn check_register(qubit: u32, register_size: u32) -> AssemblyResult<()> {
    if qubit < register_size {
        Ok(())
    } else {
        Err(AssemblyError::QubitOutOfRange {
            qubit,
            register_size,
        })
    }
}

fn circuit_name(experiment: &str, arm: &Arm) -> String {
    format!("{experiment}_{}", arm.label.replace(['-', ' '], "_"))
}

/// `x`, `h` and the optional phase lock on `source`.
fn ignite(circuit: &mut Circuit, source: QubitId, arm: &Arm) -> AssemblyResult<()> {
    circuit.x(source)?.h(source)?;
    if arm.source_lock {
        circuit.rz(QUARTER_PHASE, source)?;
    }
    Ok(())
}

// =============================================================================
// Relay
// =============================================================================

/// A phase relayed hop by hop along a path.
///
/// The first path qubit is ignited, the protocol is applied to every
/// consecutive pair in path order, and each path qubit `path[i]` is measured
/// into `c[i]`.
#[derive(Debug, Clone)]
pub struct RelayExperiment {
    name: String,
    path: Path,
    register_size: u32,
    barrier: BarrierScope,
    min_path_len: Option<usize>,
}

impl RelayExperiment {
    /// A relay along `path` on a device of `register_size` qubits.
    pub fn new(path: Path, register_size: u32) -> AssemblyResult<Self> {
        for &q in path.as_slice() {
            check_register(q, register_size)?;
        }
        Ok(Self {
            name: "relay".to_string(),
            path,
            register_size,
            barrier: BarrierScope::default(),
            min_path_len: None,
        })
    }

    /// Rename the experiment.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Choose where barriers go between steps.
    #[must_use]
    pub fn with_barrier(mut self, barrier: BarrierScope) -> Self {
        self.barrier = barrier;
        self
    }

    /// Warn when the path is shorter than `min_len`. The relay is still built.
    #[must_use]
    pub fn with_min_path_len(mut self, min_len: usize) -> Self {
        if !self.path.meets_threshold(min_len) {
            warn!(
                "Path has {} qubits, below the threshold of {}; attenuation may not be observable",
                self.path.len(),
                min_len
            );
        }
        self.min_path_len = Some(min_len);
        self
    }

    /// Whether the path is below the configured length threshold.
    pub fn is_short(&self) -> bool {
        self.min_path_len
            .is_some_and(|min| !self.path.meets_threshold(min))
    }

    /// The relay path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Experiment for RelayExperiment {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_arms(&self) -> Vec<Arm> {
        Arm::verdict()
    }

    fn build(&self, arm: &Arm) -> AssemblyResult<Circuit> {
        let width = self.path.len() as u32;
        let mut circuit =
            Circuit::with_size(circuit_name(&self.name, arm), self.register_size, width);

        ignite(&mut circuit, QubitId(self.path.first()), arm)?;

        if let Some(variant) = arm.protocol {
            let applier = ProtocolApplier::new(variant);
            for (src, dst) in self.path.pairs() {
                let (src, dst) = (QubitId(src), QubitId(dst));
                applier.apply(&mut circuit, src, dst)?;
                match self.barrier {
                    BarrierScope::All => {
                        circuit.barrier_all()?;
                    }
                    BarrierScope::Pair => {
                        circuit.barrier([src, dst])?;
                    }
                    BarrierScope::None => {}
                }
            }
        }

        for (i, &q) in self.path.as_slice().iter().enumerate() {
            circuit.measure(QubitId(q), ClbitId(i as u32))?;
        }

        debug!(
            "Built {}: {} instructions, {} two-qubit gates",
            circuit.name(),
            circuit.len(),
            circuit.num_two_qubit_gates()
        );
        Ok(circuit)
    }
}

// =============================================================================
// Skeleton
// =============================================================================

/// A star of protocol couplings from a center qubit to a set of anchors.
///
/// The ignited qubit may itself be an anchor. Every qubit of the device is
/// measured.
#[derive(Debug, Clone)]
pub struct SkeletonExperiment {
    ignite: u32,
    center: u32,
    anchors: Vec<u32>,
    register_size: u32,
}

impl SkeletonExperiment {
    /// Couple `center` to each of `anchors`, igniting `ignite`.
    pub fn new(
        ignite: u32,
        center: u32,
        anchors: Vec<u32>,
        register_size: u32,
    ) -> AssemblyResult<Self> {
        if anchors.is_empty() {
            return Err(AssemblyError::NoAnchors);
        }
        check_register(ignite, register_size)?;
        check_register(center, register_size)?;
        for &anchor in &anchors {
            check_register(anchor, register_size)?;
            if anchor == center {
                return Err(AssemblyError::QubitConflict {
                    role: "anchor",
                    other: "center",
                    qubit: anchor,
                });
            }
        }
        Ok(Self {
            ignite,
            center,
            anchors,
            register_size,
        })
    }

    /// The anchor qubits, in coupling order.
    pub fn anchors(&self) -> &[u32] {
        &self.anchors
    }
}

impl Experiment for SkeletonExperiment {
    fn name(&self) -> &str {
        "skeleton"
    }

    fn default_arms(&self) -> Vec<Arm> {
        vec![
            Arm::new(crate::protocol::ProtocolVariant::Armored).with_label("skeleton"),
            Arm::control(),
        ]
    }

    fn build(&self, arm: &Arm) -> AssemblyResult<Circuit> {
        let mut circuit = Circuit::with_size(
            circuit_name(self.name(), arm),
            self.register_size,
            self.register_size,
        );

        ignite(&mut circuit, QubitId(self.ignite), arm)?;
        if let Some(variant) = arm.protocol {
            let applier = ProtocolApplier::new(variant);
            for &anchor in &self.anchors {
                applier.apply(&mut circuit, QubitId(self.center), QubitId(anchor))?;
            }
        }
        circuit.barrier_all()?.measure_all()?;
        Ok(circuit)
    }
}

// =============================================================================
// Projection
// =============================================================================

/// A single protocol application between two possibly distant qubits.
///
/// The source is measured into `c[0]` and the target into `c[1]`. When the
/// two are not coupled, routing inserts the SWAPs.
#[derive(Debug, Clone)]
pub struct ProjectionExperiment {
    source: u32,
    target: u32,
    register_size: u32,
}

impl ProjectionExperiment {
    /// Project from `source` to `target`.
    pub fn new(source: u32, target: u32, register_size: u32) -> AssemblyResult<Self> {
        check_register(source, register_size)?;
        check_register(target, register_size)?;
        if source == target {
            return Err(AssemblyError::QubitConflict {
                role: "target",
                other: "source",
                qubit: target,
            });
        }
        Ok(Self {
            source,
            target,
            register_size,
        })
    }
}

impl Experiment for ProjectionExperiment {
    fn name(&self) -> &str {
        "projection"
    }

    fn default_arms(&self) -> Vec<Arm> {
        vec![Arm::new(crate::protocol::ProtocolVariant::Ballistic).locked()]
    }

    fn build(&self, arm: &Arm) -> AssemblyResult<Circuit> {
        let (source, target) = (QubitId(self.source), QubitId(self.target));
        let mut circuit = Circuit::with_size(circuit_name(self.name(), arm), self.register_size, 2);

        ignite(&mut circuit, source, arm)?;
        if let Some(variant) = arm.protocol {
            ProtocolApplier::new(variant).apply(&mut circuit, source, target)?;
        }
        circuit
            .barrier_all()?
            .measure(source, ClbitId(0))?
            .measure(target, ClbitId(1))?;
        Ok(circuit)
    }
}
