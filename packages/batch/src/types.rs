//! Core types for batch runs

use serde::{Deserialize, Serialize};
use snapdiff_common::ErrorKind;
use snapdiff_engine::DiffOptions;
use std::path::PathBuf;

/// Folder name snapshot frameworks use for reference images
pub const DEFAULT_MARKER_DIR: &str = "__Snapshots__";

/// Settings for one batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Comparison settings passed to the engine
    pub diff: DiffOptions,

    /// Name of the directories holding reference images
    pub marker_dir: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            diff: DiffOptions::default(),
            marker_dir: DEFAULT_MARKER_DIR.to_string(),
        }
    }
}

/// One failure image and the reference chosen for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPairing {
    pub failure: PathBuf,

    /// `None` when no reference matched
    pub reference: Option<PathBuf>,

    /// Bundle directory, relative to the output root
    pub bundle_dir: PathBuf,
}

/// Aggregate counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Failure images discovered
    pub found: usize,

    /// Bundles written completely
    pub processed: usize,

    /// Failures without a plausible reference
    pub unmatched: usize,

    /// Pairings whose copy or diff step failed
    pub diff_failed: usize,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.unmatched + self.diff_failed
    }

    pub fn record(&mut self, status: &OutcomeStatus) {
        match status {
            OutcomeStatus::Diffed { .. } => self.processed += 1,
            OutcomeStatus::Unmatched => self.unmatched += 1,
            OutcomeStatus::Failed { .. } => self.diff_failed += 1,
        }
    }
}

/// What happened to one failure image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Diffed {
        differing_pixels: u64,
        total_pixels: u64,
    },
    Unmatched,
    Failed {
        kind: ErrorKind,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingOutcome {
    pub failure: PathBuf,
    pub reference: Option<PathBuf>,

    /// Absolute bundle directory; absent when nothing was written
    pub bundle: Option<PathBuf>,

    #[serde(flatten)]
    pub status: OutcomeStatus,
}

/// Result of a batch run: counters plus the per-failure outcomes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub outcomes: Vec<PairingOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: PairingOutcome) {
        self.summary.record(&outcome.status);
        self.outcomes.push(outcome);
    }
}
