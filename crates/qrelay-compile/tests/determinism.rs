//! Compiling relay circuits onto a device keeps their structure.

use proptest::prelude::*;
use qrelay_compile::{CompileOptions, compile};
use qrelay_protocol::{Arm, Experiment, RelayExperiment};
use qrelay_topology::{CouplingGraph, GreedyLongest, Path, PathStrategy, ShortestPath};

fn relay_on(graph: &CouplingGraph, path: Path) -> RelayExperiment {
    RelayExperiment::new(path, graph.num_qubits())
        .unwrap()
        .with_min_path_len(0)
}

#[test]
fn identity_layout_keeps_every_gate_in_place() {
    let graph = CouplingGraph::heavy_hex(3, 15);
    let path = GreedyLongest::default().select(&graph).unwrap();
    let relay = relay_on(&graph, path);

    for arm in Arm::verdict() {
        let circuit = relay.build(&arm).unwrap();
        let compiled = compile(&circuit, &graph, &CompileOptions::identity(1)).unwrap();

        assert!(compiled.initial_layout.is_identity());
        assert!(compiled.layout_preserved());
        assert_eq!(compiled.swaps_inserted, 0);
        assert_eq!(compiled.circuit.instructions(), circuit.instructions());
    }
}

#[test]
fn compiling_twice_is_identical() {
    let graph = CouplingGraph::heavy_hex(3, 15);
    let path = ShortestPath::new(0, graph.num_qubits() - 1)
        .select(&graph)
        .unwrap();
    let circuit = relay_on(&graph, path).build(&Arm::verdict()[0]).unwrap();

    for level in 0..=3 {
        let options = CompileOptions::identity(level);
        let first = compile(&circuit, &graph, &options).unwrap();
        let second = compile(&circuit, &graph, &options).unwrap();
        assert_eq!(first, second, "level {level}");
    }
}

proptest! {
    #[test]
    fn determinism_holds_on_lines(len in 2u32..40, level in 0u8..=3) {
        let graph = CouplingGraph::linear(len);
        let path = Path::new((0..len).collect::<Vec<u32>>()).unwrap();
        let circuit = relay_on(&graph, path).build(&Arm::verdict()[0]).unwrap();

        let first = compile(&circuit, &graph, &CompileOptions::identity(level)).unwrap();
        let second = compile(&circuit, &graph, &CompileOptions::identity(level)).unwrap();
        prop_assert_eq!(&first.circuit, &second.circuit);
        prop_assert_eq!(first.final_layout.pairs(), second.final_layout.pairs());
        prop_assert_eq!(first.swaps_inserted, 0);
    }
}
