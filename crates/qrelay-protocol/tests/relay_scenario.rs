//! End-to-end assembly of relay circuits.

use proptest::prelude::*;
use qrelay_ir::{Angle, Circuit, ClbitId, InstructionKind, QubitId, StandardGate};
use qrelay_protocol::{Arm, Experiment, ProtocolApplier, ProtocolVariant, RelayExperiment};
use qrelay_topology::Path;

fn armored(src: u32, dst: u32) -> Vec<(StandardGate, Vec<QubitId>)> {
    let (s, d) = (QubitId(src), QubitId(dst));
    vec![
        (StandardGate::CX, vec![s, d]),
        (StandardGate::RXX(Angle::pi_over(2)), vec![s, d]),
        (StandardGate::RYY(Angle::pi_over(2)), vec![d, s]),
        (StandardGate::Rz(Angle::pi_over(4)), vec![d]),
    ]
}

#[test]
fn armored_relay_along_four_qubit_path() {
    let path = Path::new(vec![0, 24, 109, 126]).unwrap();
    let relay = RelayExperiment::new(path, 133).unwrap();
    let circuit = relay.build(&Arm::new(ProtocolVariant::Armored)).unwrap();

    // Ignition on q0 only.
    let ignition: Vec<_> = circuit.instructions()[..2]
        .iter()
        .map(|i| (i.kind, i.qubits.clone()))
        .collect();
    assert_eq!(
        ignition,
        vec![
            (InstructionKind::Gate(StandardGate::X), vec![QubitId(0)]),
            (InstructionKind::Gate(StandardGate::H), vec![QubitId(0)]),
        ]
    );
    assert_eq!(circuit.count_ops().get("x"), Some(&1));
    assert_eq!(circuit.count_ops().get("h"), Some(&1));

    // Exactly three armored sequences, in path order.
    let protocol_gates: Vec<_> = circuit.instructions()[2..]
        .iter()
        .filter_map(|i| match i.kind {
            InstructionKind::Gate(g) => Some((g, i.qubits.clone())),
            _ => None,
        })
        .collect();
    let expected: Vec<_> = [(0, 24), (24, 109), (109, 126)]
        .into_iter()
        .flat_map(|(s, d)| armored(s, d))
        .collect();
    assert_eq!(protocol_gates, expected);

    // One measurement per path qubit, into c[i] in path order.
    let measures: Vec<_> = circuit
        .instructions()
        .iter()
        .filter(|i| i.is_measure())
        .map(|i| (i.qubits[0], i.clbits[0]))
        .collect();
    assert_eq!(
        measures,
        vec![
            (QubitId(0), ClbitId(0)),
            (QubitId(24), ClbitId(1)),
            (QubitId(109), ClbitId(2)),
            (QubitId(126), ClbitId(3)),
        ]
    );
    assert_eq!(circuit.num_clbits(), 4);
    assert_eq!(circuit.num_qubits(), 133);
}

#[test]
fn verdict_batch_arms_differ_only_in_protocol_and_lock() {
    let path = Path::new(vec![0, 1, 2, 3]).unwrap();
    let relay = RelayExperiment::new(path, 4).unwrap();
    let batch = relay.build_batch(&Arm::verdict()).unwrap();

    let names: Vec<_> = batch.iter().map(Circuit::name).collect();
    assert_eq!(names, ["relay_armored", "relay_naked_wire", "relay_wrong_key"]);
    assert_eq!(batch[0].count_ops().get("rz"), Some(&4)); // lock + 3 steps
    assert_eq!(batch[1].count_ops().get("rz"), None);
    assert_eq!(batch[2].count_ops().get("rz"), Some(&3));
}

proptest! {
    #[test]
    fn protocol_sequence_is_independent_of_pair(
        src in 0_u32..64,
        dst in 0_u32..64,
        variant_index in 0_usize..4,
    ) {
        prop_assume!(src != dst);
        let variant = ProtocolVariant::ALL[variant_index];

        let mut circuit = Circuit::with_size("p", 64, 0);
        ProtocolApplier::new(variant)
            .apply(&mut circuit, QubitId(src), QubitId(dst))
            .unwrap();

        let shape: Vec<_> = circuit
            .instructions()
            .iter()
            .map(|i| {
                let roles: Vec<_> = i
                    .qubits
                    .iter()
                    .map(|q| if q.0 == src { 's' } else { 'd' })
                    .collect();
                (i.kind, roles)
            })
            .collect();

        let mut reference = Circuit::with_size("r", 2, 0);
        ProtocolApplier::new(variant)
            .apply(&mut reference, QubitId(0), QubitId(1))
            .unwrap();
        let reference_shape: Vec<_> = reference
            .instructions()
            .iter()
            .map(|i| {
                let roles: Vec<_> = i
                    .qubits
                    .iter()
                    .map(|q| if q.0 == 0 { 's' } else { 'd' })
                    .collect();
                (i.kind, roles)
            })
            .collect();

        prop_assert_eq!(shape, reference_shape);
    }
}
