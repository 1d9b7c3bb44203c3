//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::angle::Angle;

/// The gates relay experiments are built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Pauli-X gate.
    X,
    /// Hadamard gate.
    H,
    /// Rotation around Z axis.
    Rz(Angle),
    /// Controlled-X (CNOT) gate.
    CX,
    /// XX rotation gate.
    RXX(Angle),
    /// YY rotation gate.
    RYY(Angle),
    /// SWAP gate.
    Swap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::H => "h",
            StandardGate::Rz(_) => "rz",
            StandardGate::CX => "cx",
            StandardGate::RXX(_) => "rxx",
            StandardGate::RYY(_) => "ryy",
            StandardGate::Swap => "swap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X | StandardGate::H | StandardGate::Rz(_) => 1,
            StandardGate::CX | StandardGate::RXX(_) | StandardGate::RYY(_) | StandardGate::Swap => {
                2
            }
        }
    }

    /// The rotation angle, for parameterized gates.
    pub fn angle(&self) -> Option<Angle> {
        match self {
            StandardGate::Rz(theta) | StandardGate::RXX(theta) | StandardGate::RYY(theta) => {
                Some(*theta)
            }
            _ => None,
        }
    }

    /// Whether the gate is symmetric under exchange of its two operands.
    pub fn is_symmetric(&self) -> bool {
        matches!(
            self,
            StandardGate::RXX(_) | StandardGate::RYY(_) | StandardGate::Swap
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.name(), "h");
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::RYY(Angle::pi_over(2)).name(), "ryy");
        assert_eq!(
            StandardGate::Rz(Angle::pi_over(4)).angle(),
            Some(Angle::pi_over(4))
        );
        assert_eq!(StandardGate::CX.angle(), None);
    }

    #[test]
    fn test_symmetry() {
        assert!(!StandardGate::CX.is_symmetric());
        assert!(StandardGate::RXX(Angle::pi_over(2)).is_symmetric());
        assert!(StandardGate::Swap.is_symmetric());
    }
}
