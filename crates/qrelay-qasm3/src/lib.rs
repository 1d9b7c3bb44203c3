//! OpenQASM 3 output for qrelay circuits.
//!
//! The emitted text is what gets submitted to a backend and what
//! `qrelay --emit <dir>` writes to disk.
//!
//! ```
//! use qrelay_ir::{Angle, Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("lock", 1, 0);
//! circuit.rz(Angle::pi_over(4), QubitId(0)).unwrap();
//!
//! let qasm = qrelay_qasm3::emit(&circuit);
//! assert!(qasm.contains("rz(pi/4) q[0];"));
//! ```

mod emitter;
pub mod error;

pub use emitter::{emit, write_all};
pub use error::{EmitError, EmitResult};
