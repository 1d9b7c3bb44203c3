//! Two-qubit protocols as data.
//!
//! A protocol is a short, fixed list of [`GateTemplate`]s. Templates name the
//! roles of their operands ([`Role::Src`], [`Role::Dst`]) instead of concrete
//! qubits, so a variant's gate sequence is identical for every pair it is
//! applied to.
//!
//! | Variant | Sequence |
//! |---------|----------|
//! | `naked-wire` | `cx(src, dst)` |
//! | `armored` | `cx(src, dst)`, `rxx(pi/2) src, dst`, `ryy(pi/2) dst, src`, `rz(pi/4) dst` |
//! | `wrong-key` | as `armored`, but `rz(0.1) dst` |
//! | `ballistic` | as `armored`, without the final `rz` |

use std::fmt;
use std::str::FromStr;

use qrelay_ir::{Angle, Circuit, Instruction, IrResult, QubitId, StandardGate};
use serde::{Deserialize, Serialize};

/// π/2, the interaction angle of the XX and YY rotations.
pub const HALF_TURN: Angle = Angle::PiFraction {
    numerator: 1,
    denominator: 2,
};

/// π/4, the phase lock applied to the destination (and optionally the source).
pub const QUARTER_PHASE: Angle = Angle::PiFraction {
    numerator: 1,
    denominator: 4,
};

/// The deliberately wrong phase of the `wrong-key` control.
pub const WRONG_PHASE: Angle = Angle::Radians(0.1);

/// Which end of the pair a template operand refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The qubit the phase comes from.
    Src,
    /// The qubit the phase is relayed to.
    Dst,
}

impl Role {
    #[inline]
    fn resolve(self, src: QubitId, dst: QubitId) -> QubitId {
        match self {
            Role::Src => src,
            Role::Dst => dst,
        }
    }
}

/// One gate of a protocol with its operands given by role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateTemplate {
    /// The gate to apply.
    pub gate: StandardGate,
    /// Operand roles, in gate operand order.
    pub roles: &'static [Role],
}

impl GateTemplate {
    const fn new(gate: StandardGate, roles: &'static [Role]) -> Self {
        Self { gate, roles }
    }

    /// Bind the template to a concrete pair.
    pub fn instantiate(&self, src: QubitId, dst: QubitId) -> Instruction {
        Instruction::gate(self.gate, self.roles.iter().map(|r| r.resolve(src, dst)))
    }
}

const SRC_DST: &[Role] = &[Role::Src, Role::Dst];
const DST_SRC: &[Role] = &[Role::Dst, Role::Src];
const DST: &[Role] = &[Role::Dst];

const NAKED_WIRE: &[GateTemplate] = &[GateTemplate::new(StandardGate::CX, SRC_DST)];

const ARMORED: &[GateTemplate] = &[
    GateTemplate::new(StandardGate::CX, SRC_DST),
    GateTemplate::new(StandardGate::RXX(HALF_TURN), SRC_DST),
    GateTemplate::new(StandardGate::RYY(HALF_TURN), DST_SRC),
    GateTemplate::new(StandardGate::Rz(QUARTER_PHASE), DST),
];

const WRONG_KEY: &[GateTemplate] = &[
    GateTemplate::new(StandardGate::CX, SRC_DST),
    GateTemplate::new(StandardGate::RXX(HALF_TURN), SRC_DST),
    GateTemplate::new(StandardGate::RYY(HALF_TURN), DST_SRC),
    GateTemplate::new(StandardGate::Rz(WRONG_PHASE), DST),
];

const BALLISTIC: &[GateTemplate] = &[
    GateTemplate::new(StandardGate::CX, SRC_DST),
    GateTemplate::new(StandardGate::RXX(HALF_TURN), SRC_DST),
    GateTemplate::new(StandardGate::RYY(HALF_TURN), DST_SRC),
];

/// The named protocol variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtocolVariant {
    /// CNOT only; the baseline.
    NakedWire,
    /// CNOT, XX and YY interaction, quarter-turn phase lock on the destination.
    Armored,
    /// As [`Armored`](Self::Armored) with an off-value destination phase.
    WrongKey,
    /// CNOT, XX and YY interaction with no destination lock.
    Ballistic,
}

impl ProtocolVariant {
    /// Every variant, in display order.
    pub const ALL: [ProtocolVariant; 4] = [
        ProtocolVariant::Armored,
        ProtocolVariant::NakedWire,
        ProtocolVariant::WrongKey,
        ProtocolVariant::Ballistic,
    ];

    /// The gate templates of this variant.
    pub fn templates(self) -> &'static [GateTemplate] {
        match self {
            ProtocolVariant::NakedWire => NAKED_WIRE,
            ProtocolVariant::Armored => ARMORED,
            ProtocolVariant::WrongKey => WRONG_KEY,
            ProtocolVariant::Ballistic => BALLISTIC,
        }
    }

    /// Number of gates one application appends.
    pub fn gate_count(self) -> usize {
        self.templates().len()
    }

    /// The configuration name of this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            ProtocolVariant::NakedWire => "naked-wire",
            ProtocolVariant::Armored => "armored",
            ProtocolVariant::WrongKey => "wrong-key",
            ProtocolVariant::Ballistic => "ballistic",
        }
    }

    /// The instructions one application to `(src, dst)` appends.
    pub fn instructions(self, src: QubitId, dst: QubitId) -> Vec<Instruction> {
        self.templates()
            .iter()
            .map(|t| t.instantiate(src, dst))
            .collect()
    }
}

impl fmt::Display for ProtocolVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "naked-wire" | "naked" => Ok(ProtocolVariant::NakedWire),
            "armored" | "armor" => Ok(ProtocolVariant::Armored),
            "wrong-key" | "wrong-phase" => Ok(ProtocolVariant::WrongKey),
            "ballistic" => Ok(ProtocolVariant::Ballistic),
            _ => Err(format!(
                "unknown protocol '{s}' (expected armored, naked-wire, wrong-key or ballistic)"
            )),
        }
    }
}

/// Applies one protocol variant for its whole lifetime.
///
/// Circuits are assembled through an applier bound to the arm's variant, so a
/// single circuit cannot mix variants across edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolApplier {
    variant: ProtocolVariant,
}

impl ProtocolApplier {
    /// Bind an applier to `variant`.
    pub fn new(variant: ProtocolVariant) -> Self {
        Self { variant }
    }

    /// The bound variant.
    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    /// Append the protocol for the pair `(src, dst)`.
    pub fn apply(&self, circuit: &mut Circuit, src: QubitId, dst: QubitId) -> IrResult<()> {
        for template in self.variant.templates() {
            circuit.push(template.instantiate(src, dst))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrelay_ir::InstructionKind;

    fn gates(circuit: &Circuit) -> Vec<(StandardGate, Vec<u32>)> {
        circuit
            .instructions()
            .iter()
            .filter_map(|inst| match inst.kind {
                InstructionKind::Gate(g) => Some((g, inst.qubits.iter().map(|q| q.0).collect())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_armored_sequence() {
        let mut circuit = Circuit::with_size("t", 130, 0);
        ProtocolApplier::new(ProtocolVariant::Armored)
            .apply(&mut circuit, QubitId(109), QubitId(126))
            .unwrap();
        assert_eq!(
            gates(&circuit),
            vec![
                (StandardGate::CX, vec![109, 126]),
                (StandardGate::RXX(Angle::pi_over(2)), vec![109, 126]),
                (StandardGate::RYY(Angle::pi_over(2)), vec![126, 109]),
                (StandardGate::Rz(Angle::pi_over(4)), vec![126]),
            ]
        );
    }

    #[test]
    fn test_naked_wire_sequence() {
        let mut circuit = Circuit::with_size("t", 2, 0);
        ProtocolApplier::new(ProtocolVariant::NakedWire)
            .apply(&mut circuit, QubitId(1), QubitId(0))
            .unwrap();
        assert_eq!(gates(&circuit), vec![(StandardGate::CX, vec![1, 0])]);
    }

    #[test]
    fn test_wrong_key_differs_only_in_phase() {
        let armored = ProtocolVariant::Armored.templates();
        let wrong = ProtocolVariant::WrongKey.templates();
        assert_eq!(armored.len(), wrong.len());
        assert_eq!(armored[..3], wrong[..3]);
        assert_eq!(wrong[3].gate, StandardGate::Rz(Angle::radians(0.1)));
        assert_eq!(wrong[3].roles, armored[3].roles);
    }

    #[test]
    fn test_ballistic_is_armored_prefix() {
        assert_eq!(
            ProtocolVariant::Ballistic.templates(),
            &ProtocolVariant::Armored.templates()[..3]
        );
    }

    #[test]
    fn test_out_of_range_pair_fails() {
        let mut circuit = Circuit::with_size("t", 2, 0);
        let result =
            ProtocolApplier::new(ProtocolVariant::Armored).apply(&mut circuit, QubitId(0), QubitId(5));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_and_display() {
        for variant in ProtocolVariant::ALL {
            assert_eq!(variant.to_string().parse::<ProtocolVariant>(), Ok(variant));
        }
        assert_eq!("naked".parse(), Ok(ProtocolVariant::NakedWire));
        assert_eq!("WRONG_KEY".parse(), Ok(ProtocolVariant::WrongKey));
        assert!("superconductor".parse::<ProtocolVariant>().is_err());
    }

    #[test]
    fn test_gate_counts() {
        assert_eq!(ProtocolVariant::NakedWire.gate_count(), 1);
        assert_eq!(ProtocolVariant::Armored.gate_count(), 4);
        assert_eq!(ProtocolVariant::WrongKey.gate_count(), 4);
        assert_eq!(ProtocolVariant::Ballistic.gate_count(), 3);
    }
}
