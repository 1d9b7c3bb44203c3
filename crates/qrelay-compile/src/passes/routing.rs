//! Routing pass for inserting SWAP gates.

use qrelay_ir::{Circuit, Instruction, QubitId, StandardGate};
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{Layout, PropertySet};

/// Summary left in the property set by [`BasicRouting`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingReport {
    /// Number of SWAP gates inserted.
    pub swaps_inserted: usize,
}

/// Basic routing pass.
///
/// Rewrites the circuit onto physical qubits, one wire per device qubit.
/// A two-qubit gate on an uncoupled pair moves its first operand along the
/// BFS shortest path with SWAPs until the pair is adjacent. Gates already on
/// coupled qubits pass through unchanged, so an identity layout over a path
/// of neighbors needs no SWAPs at all.
pub struct BasicRouting;

impl BasicRouting {
    fn physical(layout: &Layout, qubit: QubitId) -> CompileResult<QubitId> {
        layout
            .get_physical(qubit)
            .map(QubitId)
            .ok_or_else(|| CompileError::InvalidLayout(format!("{qubit} is used but not placed")))
    }
}

impl Pass for BasicRouting {
    fn name(&self) -> &'static str {
        "BasicRouting"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let graph = properties
            .coupling_graph
            .as_ref()
            .ok_or(CompileError::MissingCouplingMap)?;
        let layout = properties
            .layout
            .as_mut()
            .ok_or(CompileError::MissingLayout)?;

        let mut routed = Vec::with_capacity(circuit.len());
        let mut swaps_inserted = 0;

        for inst in circuit.instructions() {
            if inst.is_two_qubit_gate() {
                let p0 = Self::physical(layout, inst.qubits[0])?.0;
                let p1 = Self::physical(layout, inst.qubits[1])?.0;

                if !graph.is_coupled(p0, p1) {
                    let path = graph
                        .shortest_path(p0, p1)
                        .ok_or(CompileError::RoutingFailed {
                            qubit1: p0,
                            qubit2: p1,
                        })?;
                    // Walk the first operand until it neighbors the second.
                    for step in path.windows(2).take(path.len().saturating_sub(2)) {
                        routed.push(Instruction::two_qubit_gate(
                            StandardGate::Swap,
                            QubitId(step[0]),
                            QubitId(step[1]),
                        ));
                        layout.swap(step[0], step[1]);
                        swaps_inserted += 1;
                    }
                }
            }

            let qubits = inst
                .qubits
                .iter()
                .map(|&q| Self::physical(layout, q))
                .collect::<CompileResult<Vec<_>>>()?;
            routed.push(Instruction {
                kind: inst.kind,
                qubits,
                clbits: inst.clbits.clone(),
            });
        }

        debug!(
            "Routed {} onto {} physical qubits with {} SWAPs",
            circuit.name(),
            graph.num_qubits(),
            swaps_inserted
        );

        *circuit = Circuit::from_instructions(
            circuit.name().to_string(),
            graph.num_qubits(),
            circuit.num_clbits(),
            routed,
        )?;
        properties.insert(RoutingReport { swaps_inserted });
        Ok(())
    }
}
