//! Loading coupling graphs from files and presets.

use std::path::Path as FsPath;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TopologyError, TopologyResult};
use crate::graph::CouplingGraph;

/// Largest device accepted from files and presets.
pub const MAX_QUBITS: u32 = 1 << 16;

fn check_size(qubits: u64) -> TopologyResult<u32> {
    u32::try_from(qubits)
        .ok()
        .filter(|&n| n <= MAX_QUBITS)
        .ok_or(TopologyError::DeviceTooLarge {
            qubits,
            max: MAX_QUBITS,
        })
}

/// On-disk coupling map, in the shape backends report their configuration.
///
/// ```json
/// { "backend_name": "example", "n_qubits": 3, "coupling_map": [[0, 1], [1, 0], [1, 2]] }
/// ```
///
/// `num_qubits` and `edges` are accepted as aliases. When the qubit count is
/// missing it is inferred from the highest index in the edge list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouplingMapFile {
    /// Device name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_name: Option<String>,
    /// Number of physical qubits.
    #[serde(default, alias = "num_qubits")]
    pub n_qubits: Option<u32>,
    /// Coupled pairs, possibly listed in both directions.
    #[serde(alias = "edges")]
    pub coupling_map: Vec<[u32; 2]>,
}

impl CouplingMapFile {
    /// Build the coupling graph this file describes.
    pub fn into_graph(self) -> TopologyResult<CouplingGraph> {
        let num_qubits = match self.n_qubits {
            Some(n) => u64::from(n),
            None => self
                .coupling_map
                .iter()
                .flat_map(|[a, b]| [*a, *b])
                .max()
                .map_or(0, |q| u64::from(q) + 1),
        };
        let num_qubits = check_size(num_qubits)?;
        let graph =
            CouplingGraph::from_edges(num_qubits, self.coupling_map.iter().map(|[a, b]| (*a, *b)))?;
        Ok(match self.backend_name {
            Some(name) => graph.with_name(name),
            None => graph,
        })
    }

    /// Describe an existing graph.
    pub fn from_graph(graph: &CouplingGraph) -> Self {
        Self {
            backend_name: graph.name().map(str::to_string),
            n_qubits: Some(graph.num_qubits()),
            coupling_map: graph.edges().into_iter().map(|(a, b)| [a, b]).collect(),
        }
    }
}

impl CouplingGraph {
    /// Parse a coupling map from JSON text.
    pub fn from_json_str(json: &str) -> TopologyResult<Self> {
        let file: CouplingMapFile = serde_json::from_str(json)?;
        file.into_graph()
    }

    /// Read a coupling map JSON file.
    pub fn from_json_file(path: impl AsRef<FsPath>) -> TopologyResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let graph = Self::from_json_str(&json)?;
        debug!(
            "Loaded coupling map from {}: {} qubits, {} edges",
            path.display(),
            graph.num_qubits(),
            graph.num_edges()
        );
        Ok(graph)
    }

    /// Serialize to the on-disk JSON shape.
    pub fn to_json_string(&self) -> TopologyResult<String> {
        Ok(serde_json::to_string_pretty(&CouplingMapFile::from_graph(
            self,
        ))?)
    }
}

/// A generated device shape, named as `kind:size`.
///
/// | Preset | Graph |
/// |--------|-------|
/// | `linear:N` | chain of N qubits |
/// | `ring:N` | closed chain of N qubits |
/// | `grid:RxC` | R by C lattice |
/// | `heavy-hex:RxL` | R rows of L qubits with bridges |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevicePreset {
    /// [`CouplingGraph::linear`].
    Linear(u32),
    /// [`CouplingGraph::ring`].
    Ring(u32),
    /// [`CouplingGraph::grid`].
    Grid(u32, u32),
    /// [`CouplingGraph::heavy_hex`].
    HeavyHex(u32, u32),
}

impl DevicePreset {
    /// Number of qubits the preset generates.
    pub fn num_qubits(self) -> u64 {
        match self {
            DevicePreset::Linear(n) | DevicePreset::Ring(n) => u64::from(n),
            DevicePreset::Grid(r, c) => u64::from(r) * u64::from(c),
            DevicePreset::HeavyHex(rows, row_len) => {
                // Bridges follow every row but the last, offset 0 on even rows
                // and 2 on odd rows, one every fourth column.
                let links = u64::from(rows.saturating_sub(1));
                let even = links.div_ceil(2);
                let odd = links / 2;
                let row_len = u64::from(row_len);
                let bridges =
                    even * row_len.div_ceil(4) + odd * row_len.saturating_sub(2).div_ceil(4);
                u64::from(rows) * row_len + bridges
            }
        }
    }

    /// Generate the graph.
    ///
    /// Fails with [`TopologyError::DeviceTooLarge`] above [`MAX_QUBITS`].
    pub fn build(self) -> TopologyResult<CouplingGraph> {
        check_size(self.num_qubits())?;
        Ok(match self {
            DevicePreset::Linear(n) => CouplingGraph::linear(n),
            DevicePreset::Ring(n) => CouplingGraph::ring(n),
            DevicePreset::Grid(r, c) => CouplingGraph::grid(r, c),
            DevicePreset::HeavyHex(r, l) => CouplingGraph::heavy_hex(r, l),
        })
    }
}

impl FromStr for DevicePreset {
    type Err = TopologyError;

    fn from_str(s: &str) -> TopologyResult<Self> {
        let invalid = || TopologyError::InvalidPreset(s.to_string());
        let (kind, size) = s.split_once(':').ok_or_else(invalid)?;
        let dims = |size: &str| -> TopologyResult<(u32, u32)> {
            let (a, b) = size.split_once('x').ok_or_else(invalid)?;
            Ok((
                a.parse().map_err(|_| invalid())?,
                b.parse().map_err(|_| invalid())?,
            ))
        };
        let preset = match kind {
            "linear" => DevicePreset::Linear(size.parse().map_err(|_| invalid())?),
            "ring" => DevicePreset::Ring(size.parse().map_err(|_| invalid())?),
            "grid" => dims(size).map(|(r, c)| DevicePreset::Grid(r, c))?,
            "heavy-hex" => dims(size).map(|(r, l)| DevicePreset::HeavyHex(r, l))?,
            _ => return Err(invalid()),
        };
        check_size(preset.num_qubits())?;
        Ok(preset)
    }
}
