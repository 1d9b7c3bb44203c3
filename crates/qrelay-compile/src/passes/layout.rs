//! Layout pass for placing logical qubits on physical qubits.

use qrelay_ir::Circuit;
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{Layout, PropertySet};

/// Explicit layout pass.
///
/// Uses the caller's `initial_layout` as given, or logical qubit i on
/// physical qubit i when none was requested. The pass never relocates a
/// qubit on its own; it only checks that the requested placement fits the
/// device and covers every qubit the circuit uses.
pub struct ExplicitLayout;

impl Pass for ExplicitLayout {
    fn name(&self) -> &'static str {
        "ExplicitLayout"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let graph = properties
            .coupling_graph
            .as_ref()
            .ok_or(CompileError::MissingCouplingMap)?;

        if circuit.num_qubits() > graph.num_qubits() {
            return Err(CompileError::CircuitTooLarge {
                required: circuit.num_qubits(),
                available: graph.num_qubits(),
            });
        }

        let layout = properties
            .initial_layout
            .clone()
            .unwrap_or_else(|| Layout::identity(circuit.num_qubits()));

        for (logical, physical) in layout.pairs() {
            if !graph.contains(physical) {
                return Err(CompileError::InvalidLayout(format!(
                    "{logical} placed on physical qubit {physical}, device has {}",
                    graph.num_qubits()
                )));
            }
        }
        for qubit in circuit.active_qubits() {
            if layout.get_physical(qubit).is_none() {
                return Err(CompileError::InvalidLayout(format!(
                    "{qubit} is used but not placed"
                )));
            }
        }

        debug!(
            "Layout for {}: {} qubits placed, identity: {}",
            circuit.name(),
            layout.len(),
            layout.is_identity()
        );
        properties.initial_layout = Some(layout.clone());
        properties.layout = Some(layout);
        Ok(())
    }

    fn should_run(&self, _circuit: &Circuit, properties: &PropertySet) -> bool {
        properties.layout.is_none() && properties.coupling_graph.is_some()
    }
}
