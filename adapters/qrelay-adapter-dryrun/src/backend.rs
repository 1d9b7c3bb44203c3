//! Dry-run backend implementation.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use qrelay_compile::CompiledCircuit;
use qrelay_hal::{
    Backend, BackendConfig, BackendFactory, DeviceDescription, HalError, HalResult, Job, JobId,
    JobStatus,
};
use qrelay_topology::CouplingGraph;

/// A recorded submission.
struct DryRunJob {
    job: Job,
    /// OpenQASM 3 text of each circuit, in submission order.
    payload: Vec<String>,
}

/// Backend that validates and records batches without running them.
pub struct DryRunBackend {
    name: String,
    device: DeviceDescription,
    jobs: Arc<Mutex<FxHashMap<String, DryRunJob>>>,
}

impl DryRunBackend {
    /// Create a dry-run backend for a device.
    pub fn new(graph: CouplingGraph) -> Self {
        Self::with_device(DeviceDescription::new("dry-run", graph).simulated())
    }

    /// Create a dry-run backend with explicit limits.
    pub fn with_device(device: DeviceDescription) -> Self {
        Self {
            name: "dry-run".to_string(),
            device,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
        }
    }

    /// The OpenQASM 3 text submitted under `job_id`.
    pub fn payload(&self, job_id: &JobId) -> HalResult<Vec<String>> {
        self.jobs()
            .get(&job_id.0)
            .map(|j| j.payload.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    /// Full job record for `job_id`.
    pub fn job(&self, job_id: &JobId) -> HalResult<Job> {
        self.jobs()
            .get(&job_id.0)
            .map(|j| j.job.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    /// Number of jobs recorded so far.
    pub fn num_jobs(&self) -> usize {
        self.jobs().len()
    }

    fn jobs(&self) -> MutexGuard<'_, FxHashMap<String, DryRunJob>> {
        self.jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl Backend for DryRunBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn device(&self) -> &DeviceDescription {
        &self.device
    }

    #[instrument(skip(self, circuits), fields(circuits = circuits.len()))]
    async fn submit(&self, circuits: &[CompiledCircuit], shots: u32) -> HalResult<JobId> {
        self.validate(circuits, shots).await?;

        let payload: Vec<String> = circuits
            .iter()
            .map(|c| qrelay_qasm3::emit(&c.circuit))
            .collect();
        let job_id = JobId::new(Uuid::new_v4().to_string());

        // Nothing runs, so acceptance is the end of the job.
        let mut job = Job::new(job_id.clone(), &self.name, circuits.len(), shots);
        job.transition(JobStatus::Completed);

        debug!(
            "Rendered {} circuits, {} bytes of QASM",
            payload.len(),
            payload.iter().map(String::len).sum::<usize>()
        );
        self.jobs()
            .insert(job_id.0.clone(), DryRunJob { job, payload });
        info!("Accepted job {} ({} circuits x {} shots)", job_id, circuits.len(), shots);

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.jobs()
            .get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }
}

impl BackendFactory for DryRunBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let graph = config.device.ok_or_else(|| {
            HalError::Configuration("dry-run backend needs a target device".into())
        })?;

        let mut device = DeviceDescription::new(config.name.clone(), graph).simulated();
        if let Some(max_shots) = config.max_shots {
            device = device.with_max_shots(max_shots);
        }
        if let Some(max_circuits) = config.max_circuits {
            device = device.with_max_circuits(max_circuits);
        }

        let mut backend = Self::with_device(device);
        backend.name = config.name;
        Ok(backend)
    }
}
