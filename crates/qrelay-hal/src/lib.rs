//! Backend abstraction for qrelay.
//!
//! A [`Backend`] describes its device through a cached
//! [`DeviceDescription`], accepts a batch of compiled circuits with one shot
//! count, and hands back a [`JobId`]. The [`JobLedger`] keeps a local record
//! of submitted jobs when asked to.
//!
//! | Backend | Crate | Notes |
//! |---------|-------|-------|
//! | Dry run | `qrelay-adapter-dryrun` | Validates and records, never executes |

pub mod backend;
pub mod device;
pub mod error;
pub mod job;
pub mod ledger;
pub mod registry;

pub use backend::{Backend, BackendConfig, BackendFactory};
pub use device::DeviceDescription;
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use ledger::{JobLedger, LedgerEntry};
pub use registry::BackendRegistry;
