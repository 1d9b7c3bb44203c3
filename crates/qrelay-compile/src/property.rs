//! `PropertySet` and related types for pass communication.
//!
//! Passes share a [`PropertySet`]: the target coupling graph, the layout the
//! caller asked for, and the layout as it evolves through routing. Passes can
//! also leave typed reports for later passes or the caller.
//!
//! ```
//! use qrelay_compile::{Layout, PropertySet};
//! use qrelay_ir::QubitId;
//! use qrelay_topology::CouplingGraph;
//!
//! let props = PropertySet::new()
//!     .with_coupling_graph(CouplingGraph::linear(5))
//!     .with_initial_layout(Layout::identity(5));
//!
//! let layout = props.initial_layout.as_ref().unwrap();
//! assert_eq!(layout.get_physical(QubitId(3)), Some(3));
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};

use qrelay_ir::QubitId;
use qrelay_topology::CouplingGraph;

use crate::error::{CompileError, CompileResult};

/// A mapping from logical qubits to physical qubits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Map from logical qubit to physical qubit index.
    logical_to_physical: FxHashMap<QubitId, u32>,
    /// Map from physical qubit index to logical qubit.
    physical_to_logical: FxHashMap<u32, QubitId>,
}

impl Layout {
    /// Create a new empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical qubit i on physical qubit i.
    pub fn identity(num_qubits: u32) -> Self {
        let mut layout = Self::new();
        for i in 0..num_qubits {
            layout.add(QubitId(i), i);
        }
        layout
    }

    /// Logical qubit i on physical qubit `physical[i]`.
    ///
    /// Fails if two logical qubits share a physical qubit.
    pub fn from_physical(physical: &[u32]) -> CompileResult<Self> {
        let mut layout = Self::new();
        for (i, &p) in physical.iter().enumerate() {
            if let Some(other) = layout.get_logical(p) {
                return Err(CompileError::InvalidLayout(format!(
                    "physical qubit {p} assigned to both {other} and q{i}"
                )));
            }
            layout.add(QubitId(i as u32), p);
        }
        Ok(layout)
    }

    /// Add a mapping from logical to physical qubit.
    ///
    /// If the physical qubit is already mapped to a different logical qubit,
    /// the old mapping is removed first to keep both maps consistent.
    /// Similarly, if the logical qubit is already mapped to a different physical
    /// qubit, that old physical mapping is removed.
    pub fn add(&mut self, logical: QubitId, physical: u32) {
        if let Some(&old_logical) = self.physical_to_logical.get(&physical) {
            if old_logical != logical {
                self.logical_to_physical.remove(&old_logical);
            }
        }
        if let Some(&old_physical) = self.logical_to_physical.get(&logical) {
            if old_physical != physical {
                self.physical_to_logical.remove(&old_physical);
            }
        }
        self.logical_to_physical.insert(logical, physical);
        self.physical_to_logical.insert(physical, logical);
    }

    /// Get the physical qubit for a logical qubit.
    pub fn get_physical(&self, logical: QubitId) -> Option<u32> {
        self.logical_to_physical.get(&logical).copied()
    }

    /// Get the logical qubit for a physical qubit.
    pub fn get_logical(&self, physical: u32) -> Option<QubitId> {
        self.physical_to_logical.get(&physical).copied()
    }

    /// Swap the contents of two physical qubits.
    pub fn swap(&mut self, p1: u32, p2: u32) {
        let l1 = self.physical_to_logical.get(&p1).copied();
        let l2 = self.physical_to_logical.get(&p2).copied();

        if let Some(l1) = l1 {
            self.logical_to_physical.insert(l1, p2);
            self.physical_to_logical.insert(p2, l1);
        } else {
            self.physical_to_logical.remove(&p2);
        }

        if let Some(l2) = l2 {
            self.logical_to_physical.insert(l2, p1);
            self.physical_to_logical.insert(p1, l2);
        } else {
            self.physical_to_logical.remove(&p1);
        }
    }

    /// Get the number of mapped qubits.
    pub fn len(&self) -> usize {
        self.logical_to_physical.len()
    }

    /// Check if the layout is empty.
    pub fn is_empty(&self) -> bool {
        self.logical_to_physical.is_empty()
    }

    /// `(logical, physical)` pairs ordered by logical qubit.
    pub fn pairs(&self) -> Vec<(QubitId, u32)> {
        let mut pairs: Vec<_> = self
            .logical_to_physical
            .iter()
            .map(|(&l, &p)| (l, p))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    /// Whether every mapped logical qubit sits on the physical qubit of the same index.
    pub fn is_identity(&self) -> bool {
        self.logical_to_physical.iter().all(|(l, &p)| l.0 == p)
    }
}

/// Properties shared between compilation passes.
///
/// | Field | Set by | Description |
/// |-------|--------|-------------|
/// | `coupling_graph` | caller | Device connectivity |
/// | `initial_layout` | caller or layout pass | Placement before routing |
/// | `layout` | layout pass, updated by routing | Current placement |
///
/// Passes can store arbitrary reports with [`insert`](Self::insert) and
/// [`get`](Self::get); each type holds at most one value.
#[derive(Debug, Default)]
pub struct PropertySet {
    /// Target coupling graph.
    pub coupling_graph: Option<CouplingGraph>,

    /// Placement of logical qubits before routing.
    pub initial_layout: Option<Layout>,

    /// Current placement; after routing this is the final layout.
    pub layout: Option<Layout>,

    /// Custom properties storage (type-erased).
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target coupling graph.
    #[must_use]
    pub fn with_coupling_graph(mut self, graph: CouplingGraph) -> Self {
        self.coupling_graph = Some(graph);
        self
    }

    /// Request an initial layout.
    #[must_use]
    pub fn with_initial_layout(mut self, layout: Layout) -> Self {
        self.initial_layout = Some(layout);
        self
    }

    /// Insert a custom property.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable custom property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a custom property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }
}
