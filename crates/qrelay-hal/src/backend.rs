//! Backend trait and configuration.
//!
//! ```text
//!   device() ──→ validate() ──→ submit() ──→ status()
//!   (sync, &ref)   (async)       (async)      (async)
//! ```
//!
//! There is no `result()`: experiment commands submit and record the job
//! id. Outcomes are fetched out of band.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use qrelay_compile::CompiledCircuit;
use qrelay_topology::CouplingGraph;

use crate::device::DeviceDescription;
use crate::error::HalResult;
use crate::job::{JobId, JobStatus};

/// Configuration for a backend instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Device to target when the backend does not describe its own.
    #[serde(skip)]
    pub device: Option<CouplingGraph>,
    /// Override for the per-circuit shot limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shots: Option<u32>,
    /// Override for the per-job circuit limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_circuits: Option<usize>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the target device.
    #[must_use]
    pub fn with_device(mut self, graph: CouplingGraph) -> Self {
        self.device = Some(graph);
        self
    }

    /// Override the shot limit.
    #[must_use]
    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.max_shots = Some(max_shots);
        self
    }

    /// Override the circuit limit.
    #[must_use]
    pub fn with_max_circuits(mut self, max_circuits: usize) -> Self {
        self.max_circuits = Some(max_circuits);
        self
    }
}

/// Trait for quantum backends.
///
/// - `device()` is synchronous and infallible; implementations cache it at
///   construction time.
/// - `submit()` takes a whole batch plus one shot count and returns a single
///   job id. A fresh job starts in `Queued`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// The device this backend runs on.
    fn device(&self) -> &DeviceDescription;

    /// Check a batch against backend constraints before submission.
    async fn validate(&self, circuits: &[CompiledCircuit], shots: u32) -> HalResult<()> {
        self.device().check_batch(circuits, shots)
    }

    /// Submit a batch of compiled circuits.
    async fn submit(&self, circuits: &[CompiledCircuit], shots: u32) -> HalResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config() {
        let config = BackendConfig::new("dry-run")
            .with_device(CouplingGraph::linear(3))
            .with_max_shots(10)
            .with_max_circuits(2);

        assert_eq!(config.name, "dry-run");
        assert_eq!(config.device.as_ref().map(CouplingGraph::num_qubits), Some(3));
        assert_eq!(config.max_shots, Some(10));
        assert_eq!(config.max_circuits, Some(2));
    }

    #[test]
    fn test_config_serializes_without_device() {
        let config = BackendConfig::new("dry-run").with_device(CouplingGraph::linear(3));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"name":"dry-run"}"#);
    }
}
