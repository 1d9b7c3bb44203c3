//! qrelay circuit representation
//!
//! A deliberately small circuit IR: a fixed-width quantum register, a
//! classical register, and an ordered list of instructions. Relay experiments
//! are linear programs (ignite, apply a protocol along a chain, measure), so
//! instructions are kept in program order rather than as a DAG. Per-wire depth
//! is still tracked so compiled circuits can be compared and reported.
//!
//! # Example
//!
//! ```rust
//! use qrelay_ir::{Angle, Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("pair", 2, 2);
//! circuit
//!     .x(QubitId(0))?
//!     .h(QubitId(0))?
//!     .cx(QubitId(0), QubitId(1))?
//!     .rz(Angle::pi_over(4), QubitId(1))?
//!     .measure(QubitId(0), ClbitId(0))?
//!     .measure(QubitId(1), ClbitId(1))?;
//!
//! assert_eq!(circuit.len(), 6);
//! assert_eq!(circuit.depth(), 5);
//! # Ok::<(), qrelay_ir::IrError>(())
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X` | 1 | Pauli-X |
//! | `H` | 1 | Hadamard |
//! | `Rz` | 1 | Rotation around Z |
//! | `CX` | 2 | Controlled-NOT |
//! | `RXX`, `RYY` | 2 | Ising XX / YY interactions |
//! | `Swap` | 2 | SWAP, inserted by routing |

pub mod angle;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use angle::Angle;
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
