//! Append-only record of submitted jobs.
//!
//! One JSON object per line. The ledger is only written when the caller asks
//! for it; nothing in the submission path touches disk on its own.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HalError, HalResult};
use crate::job::JobId;

/// One submitted batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Id returned by the backend.
    pub job_id: JobId,
    /// Backend name.
    pub backend: String,
    /// Experiment name.
    pub experiment: String,
    /// Arm labels in submission order.
    pub arms: Vec<String>,
    /// Shots per circuit.
    pub shots: u32,
    /// Submission time.
    pub submitted_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Create an entry stamped with the current time.
    pub fn new(
        job_id: JobId,
        backend: impl Into<String>,
        experiment: impl Into<String>,
        arms: Vec<String>,
        shots: u32,
    ) -> Self {
        Self {
            job_id,
            backend: backend.into(),
            experiment: experiment.into(),
            arms,
            shots,
            submitted_at: Utc::now(),
        }
    }
}

/// A JSON-lines job ledger on disk.
#[derive(Debug, Clone)]
pub struct JobLedger {
    path: PathBuf,
}

impl JobLedger {
    /// Use the ledger at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.qrelay/jobs.jsonl`.
    pub fn default_path() -> HalResult<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".qrelay").join("jobs.jsonl"))
            .ok_or_else(|| HalError::Configuration("cannot determine home directory".into()))
    }

    /// The ledger at [`default_path`](Self::default_path).
    pub fn open_default() -> HalResult<Self> {
        Ok(Self::at(Self::default_path()?))
    }

    /// Ledger file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the file and its directory if needed.
    pub fn append(&self, entry: &LedgerEntry) -> HalResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        debug!("Recorded job {} in {}", entry.job_id, self.path.display());
        Ok(())
    }

    /// All entries in the order they were written. A missing file is empty.
    pub fn entries(&self) -> HalResult<Vec<LedgerEntry>> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(serde_json::from_str(&line)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> LedgerEntry {
        LedgerEntry::new(
            JobId::from(id),
            "dry-run",
            "relay",
            vec!["armored".into(), "naked-wire".into()],
            4000,
        )
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = JobLedger::at(dir.path().join("nested").join("jobs.jsonl"));

        ledger.append(&entry("a")).unwrap();
        ledger.append(&entry("b")).unwrap();

        let entries = ledger.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].job_id, JobId::from("a"));
        assert_eq!(entries[1].arms, vec!["armored", "naked-wire"]);

        let text = std::fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = JobLedger::at(dir.path().join("jobs.jsonl"));
        assert!(ledger.entries().unwrap().is_empty());
        assert!(!ledger.path().exists());
    }

    #[test]
    fn test_corrupt_line_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.jsonl");
        std::fs::write(&path, "not json\n").unwrap();
        let result = JobLedger::at(path).entries();
        assert!(matches!(result, Err(HalError::Serialization(_))));
    }
}
