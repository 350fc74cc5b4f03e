//! Batch Processing Orchestrator — drives N selected files through the
//! remote upload → extraction → validation pipeline.
//!
//! Flow: pre-flight validation → seed BatchRun → per-file sequential loop
//! (upload, stage log lines, change log lines, counters) → final summary →
//! resume-list refresh.
//!
//! Files are processed one at a time in input order. The backend accepts
//! one in-flight extraction per client session, and sequential processing
//! keeps the log deterministic for the same inputs. A failed unit is
//! recorded and the loop moves on; the call resolves `Ok` even when every
//! unit failed — callers inspect outcomes, not exceptions.

use tracing::{info, warn};

use crate::agents::AgentSelection;
use crate::api::{RecruitApi, UploadFile, UploadResponse};
use crate::batch::{format_elapsed, BatchRun, UnitOutcome, UnitStage};
use crate::errors::AppError;

/// Configuration for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub use_ai_extraction: bool,
    pub selection: AgentSelection,
}

/// Runs a batch over `files`, notifying `observer` with a snapshot after
/// every mutation so a progress view can re-render.
///
/// Pre-flight failures (empty selection, no agent configured) return
/// `Err` before any network call and before a `BatchRun` exists.
pub async fn run_batch(
    api: &dyn RecruitApi,
    files: &[UploadFile],
    options: &BatchOptions,
    mut observer: impl FnMut(&BatchRun),
) -> Result<BatchRun, AppError> {
    if files.is_empty() {
        return Err(AppError::Validation("No files selected".to_string()));
    }
    if !options.selection.is_configured() {
        return Err(AppError::Validation(
            "No AI agent configured; choose an agent before processing".to_string(),
        ));
    }

    let mut run = BatchRun::new(files);
    let agent = options
        .selection
        .current_agent
        .as_deref()
        .unwrap_or("unknown");
    run.append_log(format!(
        "Starting batch of {} file(s) with agent {agent} (model: {}, AI extraction: {})",
        run.total_files,
        options.selection.current_model.as_deref().unwrap_or("default"),
        if options.use_ai_extraction { "on" } else { "off" },
    ));
    observer(&run);

    for index in 0..run.total_files {
        let file = &files[index];
        run.units[index].stage = UnitStage::Uploading;
        run.append_log(format!(
            "Uploading {} ({}/{})",
            file.filename,
            index + 1,
            run.total_files
        ));
        observer(&run);

        match api.upload_resume(file, options.use_ai_extraction).await {
            Ok(response) => {
                settle_success(&mut run, index, response, &mut observer);
            }
            Err(e) => {
                // Terminal for this unit, never for the batch. Counters
                // stay untouched for failed units.
                warn!("Upload failed for {}: {e}", file.filename);
                run.units[index].stage = UnitStage::Failed;
                run.units[index].outcome = Some(Err(e.to_string()));
                run.append_log(format!("Error processing {}: {e}", file.filename));
            }
        }

        run.mark_processed();
        observer(&run);
    }

    let elapsed = format_elapsed(run.elapsed());
    run.append_log(format!(
        "Batch complete: {}/{} succeeded, {} failed, {} extraction + {} validation tokens, {elapsed}",
        run.succeeded(),
        run.total_files,
        run.failed(),
        run.extraction_tokens,
        run.validation_tokens,
    ));
    info!(
        "Batch {} finished: {}/{} succeeded in {elapsed}",
        run.id,
        run.succeeded(),
        run.total_files
    );

    // Refresh the resume list so the caller's view reflects new records.
    // A refresh failure degrades the view, not the run.
    if let Err(e) = api.list_resumes().await {
        warn!("Resume list refresh failed after batch: {e}");
        run.append_log(format!("Resume list refresh failed: {e}"));
    }
    observer(&run);

    Ok(run)
}

/// Records a successful upload: stage passage, per-stage metric lines,
/// change-description lines, and the settled outcome.
fn settle_success(
    run: &mut BatchRun,
    index: usize,
    response: UploadResponse,
    observer: &mut impl FnMut(&BatchRun),
) {
    let filename = run.units[index].filename.clone();

    // The AI stages happen server-side inside the one upload call; the
    // unit still passes through them so observers can render the path.
    if response.processing_details.is_some() {
        run.units[index].stage = UnitStage::Extracting;
        observer(run);
        run.units[index].stage = UnitStage::Validating;
        observer(run);
    }

    run.units[index].stage = UnitStage::Done;
    run.append_log(format!("Processed {filename}: {}", response.status));

    if let Some(details) = &response.processing_details {
        run.accumulate_tokens(details);
        run.append_log(format!(
            "Extraction: model {}, {} tokens, {:.1}s",
            details.extraction_model.as_deref().unwrap_or("unknown"),
            details.extraction_tokens.unwrap_or(0),
            details.extraction_seconds.unwrap_or(0.0),
        ));
        run.append_log(format!(
            "Validation: model {}, {} tokens, {:.1}s",
            details.validation_model.as_deref().unwrap_or("unknown"),
            details.validation_tokens.unwrap_or(0),
            details.validation_seconds.unwrap_or(0.0),
        ));
    }

    let mut changes = Vec::new();
    if let Some(made) = &response.changes_made {
        if made.is_empty() {
            // Silent reprocessing erodes recruiter trust: an explicit
            // "no changes" line, never an omission.
            run.append_log(format!("No changes for {filename}"));
        } else {
            for (label, items) in made.categories() {
                if !items.is_empty() {
                    run.append_log(format!("{label} changes ({filename}): {}", items.join("; ")));
                    changes.extend(items.iter().cloned());
                }
            }
        }
    }

    if let Some(cleanup) = &response.cleanup_result {
        tracing::debug!("Cleanup result for {filename}: {cleanup}");
    }

    run.units[index].outcome = Some(Ok(UnitOutcome {
        status: response.status,
        candidate_id: response.candidate_id,
        version_number: response.version_number,
        extraction_method: response.extraction_method,
        processing_details: response.processing_details,
        changes,
    }));
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
