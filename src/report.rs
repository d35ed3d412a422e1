// Batch run summary: per-document outcomes, console line, JSON file
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ExtractError;

/// A document that was written successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Converted {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Characters in the flattened text
    pub chars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub source: PathBuf,
    pub kind: &'static str,
    pub message: String,
}

impl Failure {
    pub fn new(source: &Path, err: &ExtractError) -> Self {
        Self {
            source: source.to_path_buf(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub discovered: usize,
    pub converted: Vec<Converted>,
    pub failed: Vec<Failure>,
    /// Documents never attempted because the batch aborted
    pub skipped: usize,
    pub aborted: bool,
}

impl BatchReport {
    pub fn new(started_at: DateTime<Utc>, discovered: usize) -> Self {
        Self {
            started_at,
            elapsed_ms: 0,
            discovered,
            converted: Vec::new(),
            failed: Vec::new(),
            skipped: 0,
            aborted: false,
        }
    }

    pub fn finish(mut self, elapsed: Duration) -> Self {
        self.elapsed_ms = elapsed.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut line = format!(
            "Converted {} of {} documents ({} failed, {} skipped) in {} ms",
            self.converted.len(),
            self.discovered,
            self.failed.len(),
            self.skipped,
            self.elapsed_ms
        );
        if self.aborted {
            line.push_str(", aborted after first failure");
        }
        line
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self).context("failed to encode batch report")?;
        fs::write(path, json).with_context(|| format!("failed to write report {}", path.display()))
    }
}
