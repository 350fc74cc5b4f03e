//! Batch model — the in-memory record of one multi-file processing session.
//!
//! A `BatchRun` lives for exactly one "start processing" action and is
//! discarded when the view showing it goes away; nothing here is ever
//! persisted. The orchestrator in `runner` is the only writer — the
//! rendering layer only reads snapshots — so the counters need no locking.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::api::{ProcessingDetails, UploadFile};

pub mod runner;

// ────────────────────────────────────────────────────────────────────────────
// Per-unit state
// ────────────────────────────────────────────────────────────────────────────

/// Processing stage of one upload unit. `Failed` is terminal for the unit
/// but never halts the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitStage {
    Queued,
    Uploading,
    Extracting,
    Validating,
    Done,
    Failed,
}

impl UnitStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStage::Queued => "queued",
            UnitStage::Uploading => "uploading",
            UnitStage::Extracting => "extracting",
            UnitStage::Validating => "validating",
            UnitStage::Done => "done",
            UnitStage::Failed => "failed",
        }
    }
}

/// Settled result for one successfully processed unit.
#[derive(Debug, Clone)]
pub struct UnitOutcome {
    pub status: String,
    pub candidate_id: Option<String>,
    pub version_number: Option<u32>,
    pub extraction_method: Option<String>,
    pub processing_details: Option<ProcessingDetails>,
    /// Flattened human-readable change descriptions from validation.
    pub changes: Vec<String>,
}

/// One input file submitted for processing.
///
/// Per-unit failure is a `Result` collected into the run — never an
/// exception crossing the batch boundary.
#[derive(Debug, Clone)]
pub struct UploadUnit {
    pub filename: String,
    pub size_bytes: usize,
    pub stage: UnitStage,
    pub outcome: Option<Result<UnitOutcome, String>>,
}

impl UploadUnit {
    pub fn queued(file: &UploadFile) -> Self {
        Self {
            filename: file.filename.clone(),
            size_bytes: file.size(),
            stage: UnitStage::Queued,
            outcome: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.stage == UnitStage::Done
    }

    pub fn is_failed(&self) -> bool {
        self.stage == UnitStage::Failed
    }
}

// ────────────────────────────────────────────────────────────────────────────
// BatchRun
// ────────────────────────────────────────────────────────────────────────────

/// The in-memory record of one multi-file processing session: ordered
/// units, aggregate counters, and an append-only ordered log of
/// timestamped lines.
#[derive(Debug)]
pub struct BatchRun {
    pub id: Uuid,
    pub units: Vec<UploadUnit>,
    pub total_files: usize,
    processed_files: usize,
    pub extraction_tokens: u64,
    pub validation_tokens: u64,
    pub started_at: DateTime<Local>,
    started_instant: Instant,
    log: Vec<String>,
}

impl BatchRun {
    pub fn new(files: &[UploadFile]) -> Self {
        Self {
            id: Uuid::new_v4(),
            units: files.iter().map(UploadUnit::queued).collect(),
            total_files: files.len(),
            processed_files: 0,
            extraction_tokens: 0,
            validation_tokens: 0,
            started_at: Local::now(),
            started_instant: Instant::now(),
            log: Vec::new(),
        }
    }

    /// Appends one timestamped line. The log is append-only; the only
    /// truncation is the explicit user-driven `clear_log`.
    pub fn append_log(&mut self, message: impl AsRef<str>) {
        self.log
            .push(format!("[{}] {}", Local::now().format("%H:%M:%S"), message.as_ref()));
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Explicit user "clear" — the one sanctioned log truncation.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Marks one more unit as settled. Monotonic, capped at `total_files`.
    pub fn mark_processed(&mut self) {
        if self.processed_files < self.total_files {
            self.processed_files += 1;
        }
    }

    pub fn processed_files(&self) -> usize {
        self.processed_files
    }

    /// Progress over settled units, 0–100.
    pub fn progress_percent(&self) -> f64 {
        if self.total_files == 0 {
            return 100.0;
        }
        self.processed_files as f64 / self.total_files as f64 * 100.0
    }

    pub fn accumulate_tokens(&mut self, details: &ProcessingDetails) {
        self.extraction_tokens += details.extraction_tokens.unwrap_or(0);
        self.validation_tokens += details.validation_tokens.unwrap_or(0);
    }

    pub fn succeeded(&self) -> usize {
        self.units.iter().filter(|u| u.is_done()).count()
    }

    pub fn failed(&self) -> usize {
        self.units.iter().filter(|u| u.is_failed()).count()
    }

    pub fn elapsed(&self) -> Duration {
        self.started_instant.elapsed()
    }
}

/// Wall-clock display: `"<m>m <ss>s"` at a minute or more, else `"<s>s"`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
