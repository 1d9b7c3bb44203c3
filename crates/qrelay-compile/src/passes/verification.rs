//! Verification passes run after routing and optimization.

use qrelay_ir::Circuit;
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Analysis pass that rejects any two-qubit gate on an uncoupled pair.
///
/// Runs on the routed circuit, where qubit indices are physical.
pub struct ConnectivityCheck;

impl Pass for ConnectivityCheck {
    fn name(&self) -> &'static str {
        "ConnectivityCheck"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let graph = properties
            .coupling_graph
            .as_ref()
            .ok_or(CompileError::MissingCouplingMap)?;

        let mut checked = 0;
        for inst in circuit.instructions().iter().filter(|i| i.is_two_qubit_gate()) {
            let (a, b) = (inst.qubits[0].0, inst.qubits[1].0);
            if !graph.is_coupled(a, b) {
                return Err(CompileError::ConnectivityViolation {
                    gate: inst.name().to_string(),
                    qubit1: a,
                    qubit2: b,
                });
            }
            checked += 1;
        }

        debug!("Connectivity check passed: {} two-qubit gates", checked);
        Ok(())
    }
}
