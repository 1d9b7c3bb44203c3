//! Peephole optimization passes.
//!
//! Both passes look only at instructions that are directly adjacent on every
//! wire they share. Barriers and measurements count as instructions, so
//! nothing is ever merged or cancelled across them.

use qrelay_ir::{Circuit, Instruction, InstructionKind, StandardGate};
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Running totals left in the property set by the optimization passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizationReport {
    /// Rz gates folded into a neighbor.
    pub rotations_merged: usize,
    /// Gates dropped because they reduced to the identity.
    pub gates_removed: usize,
}

/// Tracks, for each wire, the slot of the last kept instruction on it.
struct WireFront {
    kept: Vec<Option<Instruction>>,
    last: Vec<Option<usize>>,
}

impl WireFront {
    fn new(num_qubits: u32, capacity: usize) -> Self {
        Self {
            kept: Vec::with_capacity(capacity),
            last: vec![None; num_qubits as usize],
        }
    }

    /// The slot that is the most recent instruction on all of `inst`'s wires.
    fn shared_predecessor(&self, inst: &Instruction) -> Option<usize> {
        let mut slots = inst.qubits.iter().map(|q| self.last[q.index()]);
        let first = slots.next()??;
        slots.all(|s| s == Some(first)).then_some(first)
    }

    fn keep(&mut self, inst: Instruction) {
        let slot = self.kept.len();
        for q in &inst.qubits {
            self.last[q.index()] = Some(slot);
        }
        self.kept.push(Some(inst));
    }

    /// Drop a kept instruction; its wires no longer offer a partner.
    fn drop_slot(&mut self, slot: usize) {
        if let Some(inst) = self.kept[slot].take() {
            for q in &inst.qubits {
                self.last[q.index()] = None;
            }
        }
    }

    fn finish(self, circuit: &Circuit) -> CompileResult<Circuit> {
        Ok(Circuit::from_instructions(
            circuit.name().to_string(),
            circuit.num_qubits(),
            circuit.num_clbits(),
            self.kept.into_iter().flatten(),
        )?)
    }
}

fn record(properties: &mut PropertySet, merged: usize, removed: usize) {
    let mut report = properties
        .remove::<OptimizationReport>()
        .unwrap_or_default();
    report.rotations_merged += merged;
    report.gates_removed += removed;
    properties.insert(report);
}

/// Merge runs of Rz on the same wire.
///
/// `Rz(a) · Rz(b) = Rz(a + b)`. Sums that land on a multiple of 2π are
/// removed entirely.
pub struct MergeRotations;

impl Pass for MergeRotations {
    fn name(&self) -> &'static str {
        "MergeRotations"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let mut front = WireFront::new(circuit.num_qubits(), circuit.len());
        let mut merged = 0;
        let mut removed = 0;

        for inst in circuit.instructions() {
            if let InstructionKind::Gate(StandardGate::Rz(theta)) = inst.kind {
                if let Some(slot) = front.shared_predecessor(inst) {
                    if let Some(prev) = front.kept[slot].as_mut() {
                        if let InstructionKind::Gate(StandardGate::Rz(prev_theta)) = prev.kind {
                            let sum = prev_theta + theta;
                            prev.kind = InstructionKind::Gate(StandardGate::Rz(sum));
                            merged += 1;
                            if sum.is_full_turn() {
                                front.drop_slot(slot);
                                removed += 1;
                            }
                            continue;
                        }
                    }
                }
                if theta.is_full_turn() {
                    removed += 1;
                    continue;
                }
            }
            front.keep(inst.clone());
        }

        if merged > 0 || removed > 0 {
            debug!("MergeRotations: {} merged, {} removed", merged, removed);
        }
        *circuit = front.finish(circuit)?;
        record(properties, merged, removed);
        Ok(())
    }
}

/// Cancel adjacent pairs of self-inverse gates.
///
/// Covers X, H and CX on identical operands, and SWAP in either operand
/// order.
pub struct CancelInversePairs;

impl CancelInversePairs {
    fn cancels(prev: &Instruction, next: &Instruction) -> bool {
        let (Some(a), Some(b)) = (prev.as_gate(), next.as_gate()) else {
            return false;
        };
        let self_inverse = matches!(
            a,
            StandardGate::X | StandardGate::H | StandardGate::CX | StandardGate::Swap
        );
        if a != b || !self_inverse {
            return false;
        }
        if a.is_symmetric() {
            let mut p = prev.qubits.clone();
            let mut n = next.qubits.clone();
            p.sort_unstable();
            n.sort_unstable();
            p == n
        } else {
            prev.qubits == next.qubits
        }
    }
}

impl Pass for CancelInversePairs {
    fn name(&self) -> &'static str {
        "CancelInversePairs"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let mut front = WireFront::new(circuit.num_qubits(), circuit.len());
        let mut removed = 0;

        for inst in circuit.instructions() {
            if inst.is_gate() {
                if let Some(slot) = front.shared_predecessor(inst) {
                    let pair = front.kept[slot].as_ref().is_some_and(|prev| {
                        prev.qubits.len() == inst.qubits.len() && Self::cancels(prev, inst)
                    });
                    if pair {
                        front.drop_slot(slot);
                        removed += 2;
                        continue;
                    }
                }
            }
            front.keep(inst.clone());
        }

        if removed > 0 {
            debug!("CancelInversePairs: {} gates removed", removed);
        }
        *circuit = front.finish(circuit)?;
        record(properties, 0, removed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrelay_ir::{Angle, ClbitId, QubitId};

    #[test]
    fn test_merge_rz_run() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.rz(Angle::pi_over(4), QubitId(0)).unwrap();
        circuit.rz(Angle::pi_over(4), QubitId(0)).unwrap();

        let mut props = PropertySet::new();
        MergeRotations.run(&mut circuit, &mut props).unwrap();

        assert_eq!(circuit.len(), 1);
        assert_eq!(
            circuit.instructions()[0].as_gate(),
            Some(&StandardGate::Rz(Angle::pi_over(2)))
        );
        assert_eq!(props.get::<OptimizationReport>().unwrap().rotations_merged, 1);
    }

    #[test]
    fn test_merge_to_full_turn_removes() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.rz(Angle::pi_fraction(3, 2), QubitId(0)).unwrap();
        circuit.rz(Angle::pi_over(2), QubitId(0)).unwrap();

        MergeRotations.run(&mut circuit, &mut PropertySet::new()).unwrap();
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_rz_not_merged_across_barrier() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.rz(Angle::pi_over(4), QubitId(0)).unwrap();
        circuit.barrier_all().unwrap();
        circuit.rz(Angle::pi_over(4), QubitId(0)).unwrap();

        MergeRotations.run(&mut circuit, &mut PropertySet::new()).unwrap();
        assert_eq!(circuit.len(), 3);
    }

    #[test]
    fn test_rz_not_merged_across_cx() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.rz(Angle::pi_over(4), QubitId(1)).unwrap();
        circuit.cx(QubitId(1), QubitId(0)).unwrap();
        circuit.rz(Angle::pi_over(4), QubitId(1)).unwrap();

        MergeRotations.run(&mut circuit, &mut PropertySet::new()).unwrap();
        assert_eq!(circuit.len(), 3);
    }

    #[test]
    fn test_cancel_cx_pair() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        CancelInversePairs
            .run(&mut circuit, &mut PropertySet::new())
            .unwrap();
        assert_eq!(circuit.len(), 1);
        assert_eq!(circuit.instructions()[0].name(), "h");
    }

    #[test]
    fn test_reversed_cx_kept() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(1), QubitId(0)).unwrap();

        CancelInversePairs
            .run(&mut circuit, &mut PropertySet::new())
            .unwrap();
        assert_eq!(circuit.len(), 2);
    }

    #[test]
    fn test_swap_either_order() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.swap(QubitId(0), QubitId(1)).unwrap();
        circuit.swap(QubitId(1), QubitId(0)).unwrap();

        CancelInversePairs
            .run(&mut circuit, &mut PropertySet::new())
            .unwrap();
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_odd_run_leaves_one() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        for _ in 0..3 {
            circuit.x(QubitId(0)).unwrap();
        }

        let mut props = PropertySet::new();
        CancelInversePairs.run(&mut circuit, &mut props).unwrap();
        assert_eq!(circuit.len(), 1);
        assert_eq!(props.get::<OptimizationReport>().unwrap().gates_removed, 2);
    }

    #[test]
    fn test_measure_blocks_cancel() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        circuit.x(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.x(QubitId(0)).unwrap();

        CancelInversePairs
            .run(&mut circuit, &mut PropertySet::new())
            .unwrap();
        assert_eq!(circuit.len(), 3);
    }
}
