//! Layout-preserving compilation for qrelay circuits.
//!
//! Takes a logical circuit and places it on a device's physical qubits
//! through a small pass pipeline:
//!
//! ```text
//! Input Circuit
//!       │
//!       ▼
//! PassManager ◄── PropertySet (coupling graph, requested layout)
//!       │
//!       ├── ExplicitLayout       never relocates a qubit
//!       ├── BasicRouting         SWAPs only for uncoupled pairs
//!       ├── MergeRotations       level 1+
//!       ├── CancelInversePairs   level 2+
//!       └── ConnectivityCheck
//!       │
//!       ▼
//! Physical circuit + initial/final layout
//! ```
//!
//! # Example
//!
//! ```rust
//! use qrelay_compile::{compile, CompileOptions};
//! use qrelay_ir::{Circuit, QubitId};
//! use qrelay_topology::CouplingGraph;
//!
//! let mut circuit = Circuit::with_size("pair", 2, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let compiled = compile(&circuit, &CouplingGraph::linear(4), &CompileOptions::default()).unwrap();
//! assert!(compiled.layout_preserved());
//! assert_eq!(compiled.circuit.num_qubits(), 4);
//! ```
//!
//! # Optimization Levels
//!
//! | Level | Passes Included |
//! |-------|-----------------|
//! | 0 | Layout + routing only |
//! | 1 | + Rz merging |
//! | 2 | + self-inverse pair cancellation |
//! | 3 | second round of both |

pub mod compile;
pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;
pub mod property;

pub use compile::{CompileOptions, CompiledCircuit, LayoutMethod, compile};
pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder};
pub use pass::{Pass, PassKind};
pub use property::{Layout, PropertySet};
