//! QASM3 emitter for serializing circuits.

use std::fs;
use std::path::{Path, PathBuf};

use qrelay_ir::{Circuit, ClbitId, Instruction, InstructionKind, QubitId, StandardGate};
use tracing::debug;

use crate::error::{EmitError, EmitResult};

/// `rxx` and `ryy` are not part of `stdgates.inc`; these definitions make
/// the output self-contained.
const RXX_DEF: &str = "gate rxx(theta) a, b { h a; h b; cx a, b; rz(theta) b; cx a, b; h a; h b; }";
const RYY_DEF: &str = "gate ryy(theta) a, b { rx(pi/2) a; rx(pi/2) b; cx a, b; rz(theta) b; cx a, b; rx(-pi/2) a; rx(-pi/2) b; }";

/// Emit a circuit as QASM3 source code.
pub fn emit(circuit: &Circuit) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_circuit(circuit);
    emitter.output
}

/// Write each circuit to `<dir>/<name>.qasm`, creating `dir` if needed.
///
/// Returns the written paths in input order.
pub fn write_all(dir: &Path, circuits: &[&Circuit]) -> EmitResult<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| EmitError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(circuits.len());
    for circuit in circuits {
        let name = circuit.name();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(EmitError::InvalidFileName(name.to_string()));
        }
        let path = dir.join(format!("{name}.qasm"));
        fs::write(&path, emit(circuit)).map_err(|source| EmitError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// QASM3 emitter.
struct Emitter {
    output: String,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) {
        self.writeln("OPENQASM 3.0;");
        self.writeln("include \"stdgates.inc\";");

        let gates = || circuit.instructions().iter().filter_map(Instruction::as_gate);
        let needs_rxx = gates().any(|g| matches!(g, StandardGate::RXX(_)));
        let needs_ryy = gates().any(|g| matches!(g, StandardGate::RYY(_)));
        if needs_rxx || needs_ryy {
            self.writeln("");
        }
        if needs_rxx {
            self.writeln(RXX_DEF);
        }
        if needs_ryy {
            self.writeln(RYY_DEF);
        }
        self.writeln("");

        let num_qubits = circuit.num_qubits();
        if num_qubits > 0 {
            self.writeln(&format!("qubit[{num_qubits}] q;"));
        }
        let num_clbits = circuit.num_clbits();
        if num_clbits > 0 {
            self.writeln(&format!("bit[{num_clbits}] c;"));
        }
        if num_qubits > 0 || num_clbits > 0 {
            self.writeln("");
        }

        for instruction in circuit.instructions() {
            self.emit_instruction(instruction, num_qubits);
        }
    }

    fn emit_instruction(&mut self, instruction: &Instruction, num_qubits: u32) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits = emit_qubits(&instruction.qubits);
                match gate.angle() {
                    Some(theta) => self.writeln(&format!("{}({theta}) {qubits};", gate.name())),
                    None => self.writeln(&format!("{} {qubits};", gate.name())),
                }
            }

            InstructionKind::Measure => {
                for (q, c) in instruction.qubits.iter().zip(&instruction.clbits) {
                    self.writeln(&format!("{} = measure {};", emit_clbit(*c), emit_qubit(*q)));
                }
            }

            InstructionKind::Barrier => {
                let full = instruction.qubits.len() == num_qubits as usize
                    && instruction
                        .qubits
                        .iter()
                        .enumerate()
                        .all(|(i, q)| q.index() == i);
                if full {
                    self.writeln("barrier q;");
                } else {
                    self.writeln(&format!("barrier {};", emit_qubits(&instruction.qubits)));
                }
            }
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

fn emit_qubit(qubit: QubitId) -> String {
    format!("q[{}]", qubit.0)
}

fn emit_clbit(clbit: ClbitId) -> String {
    format!("c[{}]", clbit.0)
}

fn emit_qubits(qubits: &[QubitId]) -> String {
    qubits
        .iter()
        .map(|q| emit_qubit(*q))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrelay_ir::Angle;

    #[test]
    fn test_emit_header_and_registers() {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.measure(QubitId(1), ClbitId(1)).unwrap();

        let qasm = emit(&circuit);
        assert!(qasm.starts_with("OPENQASM 3.0;\ninclude \"stdgates.inc\";\n"));
        assert!(qasm.contains("qubit[2] q;"));
        assert!(qasm.contains("bit[2] c;"));
        assert!(qasm.contains("h q[0];"));
        assert!(qasm.contains("cx q[0], q[1];"));
        assert!(qasm.contains("c[1] = measure q[1];"));
        assert!(!qasm.contains("gate rxx"));
    }

    #[test]
    fn test_emit_angles() {
        let mut circuit = Circuit::with_size("angles", 2, 0);
        circuit.rz(Angle::pi_over(4), QubitId(1)).unwrap();
        circuit.rz(Angle::radians(0.1), QubitId(1)).unwrap();
        circuit.rxx(Angle::pi_over(2), QubitId(0), QubitId(1)).unwrap();
        circuit.ryy(Angle::pi_over(2), QubitId(1), QubitId(0)).unwrap();

        let qasm = emit(&circuit);
        assert!(qasm.contains("rz(pi/4) q[1];"));
        assert!(qasm.contains("rz(0.1) q[1];"));
        assert!(qasm.contains("rxx(pi/2) q[0], q[1];"));
        assert!(qasm.contains("ryy(pi/2) q[1], q[0];"));
        assert!(qasm.contains(RXX_DEF));
        assert!(qasm.contains(RYY_DEF));
    }

    #[test]
    fn test_emit_barriers() {
        let mut circuit = Circuit::with_size("barriers", 3, 0);
        circuit.barrier_all().unwrap();
        circuit.barrier([QubitId(0), QubitId(2)]).unwrap();

        let qasm = emit(&circuit);
        assert!(qasm.contains("barrier q;"));
        assert!(qasm.contains("barrier q[0], q[2];"));
    }

    #[test]
    fn test_write_all() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = Circuit::with_size("relay_armored", 1, 0);
        a.x(QubitId(0)).unwrap();
        let b = Circuit::with_size("relay_naked_wire", 1, 0);

        let out = dir.path().join("qasm");
        let paths = write_all(&out, &[&a, &b]).unwrap();

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], out.join("relay_armored.qasm"));
        let text = std::fs::read_to_string(&paths[0]).unwrap();
        assert!(text.contains("x q[0];"));
    }

    #[test]
    fn test_write_rejects_path_names() {
        let dir = tempfile::tempdir().unwrap();
        let circuit = Circuit::with_size("../escape", 1, 0);
        let result = write_all(dir.path(), &[&circuit]);
        assert!(matches!(result, Err(EmitError::InvalidFileName(_))));
    }
}
