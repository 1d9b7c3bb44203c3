//! Relay protocols and experiment assembly.
//!
//! Protocol variants are data: each [`ProtocolVariant`] maps to a fixed list
//! of gate templates applied to a `(src, dst)` pair. Experiments
//! ([`RelayExperiment`], [`SkeletonExperiment`], [`ProjectionExperiment`])
//! turn a path or a set of anchors into one circuit per [`Arm`].
//!
//! # Example
//!
//! ```rust
//! use qrelay_protocol::{Arm, Experiment, ProtocolVariant, RelayExperiment};
//! use qrelay_topology::Path;
//!
//! let path = Path::new(vec![0, 24, 109, 126])?;
//! let relay = RelayExperiment::new(path, 133)?;
//! let circuit = relay.build(&Arm::new(ProtocolVariant::Armored))?;
//!
//! assert_eq!(circuit.num_two_qubit_gates(), 3 * 3);
//! assert_eq!(circuit.num_clbits(), 4);
//! # Ok::<(), qrelay_protocol::AssemblyError>(())
//! ```

pub mod arm;
pub mod config;
pub mod error;
pub mod experiment;
pub mod protocol;

pub use arm::Arm;
pub use config::{
    Batch, EnduranceConfig, ExperimentConfig, ExperimentKind, LongPathHeuristic,
    ProjectionConfig, RelayConfig, SkeletonConfig,
};
pub use error::{AssemblyError, AssemblyResult};
pub use experiment::{
    BarrierScope, Experiment, ProjectionExperiment, RelayExperiment, SkeletonExperiment,
};
pub use protocol::{GateTemplate, ProtocolApplier, ProtocolVariant, Role};
