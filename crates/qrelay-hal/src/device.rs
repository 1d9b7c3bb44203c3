//! What a backend can run.

use qrelay_compile::CompiledCircuit;
use qrelay_topology::CouplingGraph;

use crate::error::{HalError, HalResult};

/// Static description of a backend's device and job limits.
///
/// Cached at construction so that [`Backend::device`](crate::Backend::device)
/// is synchronous and infallible.
#[derive(Debug, Clone)]
pub struct DeviceDescription {
    /// Device name.
    pub name: String,
    /// Qubit connectivity.
    coupling_graph: CouplingGraph,
    /// Maximum shots per circuit.
    pub max_shots: u32,
    /// Maximum circuits per job.
    pub max_circuits: usize,
    /// Whether jobs are only recorded, never executed.
    pub is_simulated: bool,
}

impl DeviceDescription {
    /// Describe a device by its coupling graph.
    pub fn new(name: impl Into<String>, coupling_graph: CouplingGraph) -> Self {
        Self {
            name: name.into(),
            coupling_graph,
            max_shots: 100_000,
            max_circuits: 300,
            is_simulated: false,
        }
    }

    /// Set the shot limit.
    #[must_use]
    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.max_shots = max_shots;
        self
    }

    /// Set the per-job circuit limit.
    #[must_use]
    pub fn with_max_circuits(mut self, max_circuits: usize) -> Self {
        self.max_circuits = max_circuits;
        self
    }

    /// Mark the device as simulated.
    #[must_use]
    pub fn simulated(mut self) -> Self {
        self.is_simulated = true;
        self
    }

    /// Number of physical qubits.
    pub fn num_qubits(&self) -> u32 {
        self.coupling_graph.num_qubits()
    }

    /// Qubit connectivity.
    pub fn coupling_graph(&self) -> &CouplingGraph {
        &self.coupling_graph
    }

    /// Check a batch against the device limits.
    ///
    /// Rejects empty batches, too many circuits, shot counts of zero or over
    /// the limit, circuits wider than the device, and two-qubit gates on
    /// uncoupled pairs.
    pub fn check_batch(&self, circuits: &[CompiledCircuit], shots: u32) -> HalResult<()> {
        if circuits.is_empty() {
            return Err(HalError::EmptyBatch);
        }
        if circuits.len() > self.max_circuits {
            return Err(HalError::TooManyCircuits {
                submitted: circuits.len(),
                max: self.max_circuits,
            });
        }
        if shots == 0 || shots > self.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots requested, allowed range is 1..={}",
                self.max_shots
            )));
        }

        for compiled in circuits {
            let circuit = &compiled.circuit;
            if circuit.num_qubits() > self.num_qubits() {
                return Err(HalError::CircuitTooLarge {
                    circuit: circuit.name().to_string(),
                    required: circuit.num_qubits(),
                    available: self.num_qubits(),
                });
            }
            for inst in circuit.instructions().iter().filter(|i| i.is_two_qubit_gate()) {
                let (a, b) = (inst.qubits[0].0, inst.qubits[1].0);
                if !self.coupling_graph.is_coupled(a, b) {
                    return Err(HalError::UncoupledGate {
                        circuit: circuit.name().to_string(),
                        qubit1: a,
                        qubit2: b,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrelay_compile::{CompileOptions, compile};
    use qrelay_ir::{Circuit, QubitId};

    fn compiled(width: u32, graph: &CouplingGraph) -> CompiledCircuit {
        let mut circuit = Circuit::with_size("pair", width, 0);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        compile(&circuit, graph, &CompileOptions::default()).unwrap()
    }

    #[test]
    fn test_accepts_valid_batch() {
        let device = DeviceDescription::new("line", CouplingGraph::linear(4));
        let batch = vec![compiled(2, device.coupling_graph())];
        assert!(device.check_batch(&batch, 4000).is_ok());
        assert_eq!(device.num_qubits(), 4);
    }

    #[test]
    fn test_rejects_limits() {
        let device = DeviceDescription::new("line", CouplingGraph::linear(4))
            .with_max_circuits(1)
            .with_max_shots(100);
        let one = compiled(2, device.coupling_graph());

        assert!(matches!(device.check_batch(&[], 10), Err(HalError::EmptyBatch)));
        assert!(matches!(
            device.check_batch(&[one.clone(), one.clone()], 10),
            Err(HalError::TooManyCircuits { submitted: 2, max: 1 })
        ));
        assert!(matches!(
            device.check_batch(std::slice::from_ref(&one), 101),
            Err(HalError::InvalidShots(_))
        ));
        assert!(matches!(
            device.check_batch(std::slice::from_ref(&one), 0),
            Err(HalError::InvalidShots(_))
        ));
    }

    #[test]
    fn test_rejects_wide_circuit() {
        let device = DeviceDescription::new("small", CouplingGraph::linear(3));
        let wide = compiled(2, &CouplingGraph::linear(6));
        assert!(matches!(
            device.check_batch(&[wide], 10),
            Err(HalError::CircuitTooLarge { required: 6, available: 3, .. })
        ));
    }

    #[test]
    fn test_rejects_uncoupled_gate() {
        let device = DeviceDescription::new("ring", CouplingGraph::from_edges(3, [(0, 2)]).unwrap());
        let other = compiled(2, &CouplingGraph::linear(3));
        assert!(matches!(
            device.check_batch(&[other], 10),
            Err(HalError::UncoupledGate { qubit1: 0, qubit2: 1, .. })
        ));
    }
}
