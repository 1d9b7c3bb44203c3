//! Experimental arms.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::protocol::ProtocolVariant;

/// One arm of an experiment batch.
///
/// Every circuit in a batch is built for exactly one arm. An arm without a
/// protocol is a control: it is ignited and measured but no pair is coupled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arm {
    /// Label used for circuit names and reports.
    pub label: String,
    /// Protocol applied along every pair, or `None` for a control arm.
    #[serde(default)]
    pub protocol: Option<ProtocolVariant>,
    /// Lock the source phase with `rz(pi/4)` right after ignition.
    #[serde(default)]
    pub source_lock: bool,
}

impl Arm {
    /// An arm applying `variant`, labelled with the variant name.
    pub fn new(variant: ProtocolVariant) -> Self {
        Self {
            label: variant.as_str().to_string(),
            protocol: Some(variant),
            source_lock: false,
        }
    }

    /// An arm that only ignites and measures.
    pub fn control() -> Self {
        Self {
            label: "control".to_string(),
            protocol: None,
            source_lock: false,
        }
    }

    /// Lock the source phase.
    #[must_use]
    pub fn locked(mut self) -> Self {
        self.source_lock = true;
        self
    }

    /// Replace the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Whether this is a control arm.
    pub fn is_control(&self) -> bool {
        self.protocol.is_none()
    }

    /// The three-way comparison: locked armored relay against a bare CNOT
    /// chain and an armored chain with the wrong phase key.
    pub fn verdict() -> Vec<Arm> {
        vec![
            Arm::new(ProtocolVariant::Armored).locked(),
            Arm::new(ProtocolVariant::NakedWire),
            Arm::new(ProtocolVariant::WrongKey),
        ]
    }
}

/// Parses `control`, a protocol name, or a protocol name with a `+lock`
/// suffix (`armored+lock`).
impl FromStr for Arm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, locked) = match s.split_once('+') {
            Some((name, "lock")) => (name, true),
            Some((_, suffix)) => return Err(format!("unknown arm modifier '{suffix}' in '{s}'")),
            None => (s, false),
        };
        let arm = if name.eq_ignore_ascii_case("control") {
            Arm::control()
        } else {
            Arm::new(name.parse()?)
        };
        Ok(if locked { arm.locked() } else { arm })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_arms() {
        let arms = Arm::verdict();
        let labels: Vec<_> = arms.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, ["armored", "naked-wire", "wrong-key"]);
        // Only the armored arm locks the source.
        assert_eq!(
            arms.iter().map(|a| a.source_lock).collect::<Vec<_>>(),
            [true, false, false]
        );
    }

    #[test]
    fn test_control_arm() {
        let arm = Arm::control();
        assert!(arm.is_control());
        assert!(!Arm::new(ProtocolVariant::NakedWire).is_control());
    }

    #[test]
    fn test_parse_arm() {
        let arm: Arm = "armored+lock".parse().unwrap();
        assert_eq!(arm, Arm::new(ProtocolVariant::Armored).locked());

        let arm: Arm = "naked".parse().unwrap();
        assert_eq!(arm.protocol, Some(ProtocolVariant::NakedWire));
        assert!(!arm.source_lock);

        let arm: Arm = "control+lock".parse().unwrap();
        assert!(arm.is_control());
        assert!(arm.source_lock);

        assert!("armored+twice".parse::<Arm>().is_err());
        assert!("teleport".parse::<Arm>().is_err());
    }
}
