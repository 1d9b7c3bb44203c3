//! Dry-run backend for qrelay.
//!
//! Accepts a batch exactly the way a hardware backend would: the batch is
//! checked against the device limits, every circuit is rendered to
//! OpenQASM 3, and a job id is issued. Nothing is executed. Jobs live only
//! as long as the backend value.
//!
//! # Example
//!
//! ```ignore
//! use qrelay_adapter_dryrun::DryRunBackend;
//! use qrelay_hal::Backend;
//! use qrelay_topology::CouplingGraph;
//!
//! let backend = DryRunBackend::new(CouplingGraph::heavy_hex(7, 15));
//! let job_id = backend.submit(&compiled, 4000).await?;
//! println!("{job_id}: {}", backend.status(&job_id).await?);
//! ```

mod backend;

pub use backend::DryRunBackend;
