//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use qrelay_ir::Circuit;
use qrelay_topology::CouplingGraph;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{
    BasicRouting, CancelInversePairs, ConnectivityCheck, ExplicitLayout, MergeRotations,
};
use crate::property::{Layout, PropertySet};

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given circuit.
    #[instrument(skip(self, circuit, properties), fields(circuit = circuit.name()))]
    pub fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            circuit.num_qubits()
        );

        for pass in &self.passes {
            if pass.should_run(circuit, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(circuit, properties)?;
                debug!("Pass {} completed, ops: {}", pass.name(), circuit.len());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final depth: {}, ops: {}",
            circuit.depth(),
            circuit.len()
        );

        Ok(())
    }

    /// Names of the passes in execution order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating pass managers with preset configurations.
pub struct PassManagerBuilder {
    /// Optimization level (0-3).
    optimization_level: u8,
    /// Target properties.
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            optimization_level: 1,
            properties: PropertySet::new(),
        }
    }

    /// Set the optimization level.
    ///
    /// - Level 0: layout, routing and the connectivity check only
    /// - Level 1: also merge Rz runs (default)
    /// - Level 2: also cancel adjacent self-inverse pairs
    /// - Level 3: a second round of both optimizations
    ///
    /// No level moves a gate past another gate on the same wire.
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(3);
        self
    }

    /// Set the target coupling graph.
    #[must_use]
    pub fn with_coupling_graph(mut self, graph: CouplingGraph) -> Self {
        self.properties.coupling_graph = Some(graph);
        self
    }

    /// Request an explicit placement instead of the identity.
    #[must_use]
    pub fn with_initial_layout(mut self, layout: Layout) -> Self {
        self.properties.initial_layout = Some(layout);
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();

        if self.properties.coupling_graph.is_some() {
            pm.add_pass(ExplicitLayout);
            pm.add_pass(BasicRouting);
        }

        let rounds = match self.optimization_level {
            0 => 0,
            3 => 2,
            _ => 1,
        };
        for _ in 0..rounds {
            pm.add_pass(MergeRotations);
            if self.optimization_level >= 2 {
                pm.add_pass(CancelInversePairs);
            }
        }

        // Always last, so no optimization can leave an uncoupled pair behind.
        if self.properties.coupling_graph.is_some() {
            pm.add_pass(ConnectivityCheck);
        }

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
