//! One-call compilation of a circuit onto a device.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use qrelay_ir::Circuit;
use qrelay_topology::CouplingGraph;

use crate::error::{CompileError, CompileResult};
use crate::manager::PassManagerBuilder;
use crate::passes::RoutingReport;
use crate::property::Layout;

/// Where logical qubits start out on the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMethod {
    /// Logical qubit i on physical qubit i.
    #[default]
    Identity,
    /// Logical qubit i on physical qubit `mapping[i]`.
    Explicit(Vec<u32>),
}

/// Options for [`compile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Initial placement.
    pub layout: LayoutMethod,
    /// Optimization level, 0 to 3.
    pub optimization_level: u8,
}

impl CompileOptions {
    /// Identity placement at the given optimization level.
    pub fn identity(optimization_level: u8) -> Self {
        Self {
            layout: LayoutMethod::Identity,
            optimization_level,
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::identity(1)
    }
}

/// A circuit mapped onto physical qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledCircuit {
    /// The physical circuit, one wire per device qubit.
    pub circuit: Circuit,
    /// Placement before routing.
    pub initial_layout: Layout,
    /// Placement after routing.
    pub final_layout: Layout,
    /// SWAP gates added by routing.
    pub swaps_inserted: usize,
    /// Level the circuit was compiled at.
    pub optimization_level: u8,
}

impl CompiledCircuit {
    /// The circuit name.
    pub fn name(&self) -> &str {
        self.circuit.name()
    }

    /// Whether routing left every qubit where it started.
    pub fn layout_preserved(&self) -> bool {
        self.initial_layout == self.final_layout
    }
}

/// Compile a circuit for a device.
///
/// Deterministic: the same circuit, graph and options always give the same
/// output.
#[instrument(skip_all, fields(circuit = circuit.name(), level = options.optimization_level))]
pub fn compile(
    circuit: &Circuit,
    graph: &CouplingGraph,
    options: &CompileOptions,
) -> CompileResult<CompiledCircuit> {
    if options.optimization_level > 3 {
        return Err(CompileError::InvalidOptimizationLevel(
            options.optimization_level,
        ));
    }

    let mut builder = PassManagerBuilder::new()
        .with_optimization_level(options.optimization_level)
        .with_coupling_graph(graph.clone());
    if let LayoutMethod::Explicit(mapping) = &options.layout {
        builder = builder.with_initial_layout(Layout::from_physical(mapping)?);
    }
    let (pm, mut properties) = builder.build();

    let mut compiled = circuit.clone();
    pm.run(&mut compiled, &mut properties)?;

    let initial_layout = properties
        .initial_layout
        .take()
        .ok_or(CompileError::MissingLayout)?;
    let final_layout = properties
        .layout
        .take()
        .ok_or(CompileError::MissingLayout)?;
    let swaps_inserted = properties
        .get::<RoutingReport>()
        .map_or(0, |r| r.swaps_inserted);

    debug!(
        "Compiled {}: {} ops, depth {}, {} SWAPs",
        compiled.name(),
        compiled.len(),
        compiled.depth(),
        swaps_inserted
    );

    Ok(CompiledCircuit {
        circuit: compiled,
        initial_layout,
        final_layout,
        swaps_inserted,
        optimization_level: options.optimization_level,
    })
}
