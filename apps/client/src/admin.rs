//! Administrative cleanup operations — reprocessing, version pruning, and
//! the destructive full wipe, each rendered as display lines.
//!
//! These are user-initiated maintenance actions, distinct from the batch
//! loop: a reprocess is how a failed unit gets retried.

use tracing::info;

use crate::api::RecruitApi;
use crate::errors::AppError;

/// Re-runs extraction/validation for the given resume ids and renders one
/// line per id plus a header line.
pub async fn reprocess_summary(
    api: &dyn RecruitApi,
    ids: &[String],
) -> Result<Vec<String>, AppError> {
    if ids.is_empty() {
        return Err(AppError::Validation("No resumes selected".to_string()));
    }
    let response = api.reprocess_resumes(ids).await?;
    info!(
        "Reprocess: {}/{} successful",
        response.successful, response.requested
    );

    let mut lines = vec![format!(
        "Reprocessed {} of {} resume(s)",
        response.successful, response.requested
    )];
    for result in &response.results {
        match &result.message {
            Some(message) => lines.push(format!(
                "{}: {} ({message})",
                result.resume_id, result.status
            )),
            None => lines.push(format!("{}: {}", result.resume_id, result.status)),
        }
    }
    Ok(lines)
}

/// Prunes old resume versions, keeping `keep_count` per candidate.
pub async fn cleanup_summary(api: &dyn RecruitApi, keep_count: u32) -> Result<Vec<String>, AppError> {
    if keep_count == 0 {
        return Err(AppError::Validation(
            "keep_count must be at least 1".to_string(),
        ));
    }
    let response = api.cleanup_old_versions(keep_count).await?;
    let mut lines = vec![format!(
        "Cleaned {} old version(s), kept {}",
        response.cleaned, response.kept
    )];
    if let Some(candidates) = response.candidates_processed {
        lines.push(format!("Candidates processed: {candidates}"));
    }
    if !response.message.is_empty() {
        lines.push(response.message);
    }
    Ok(lines)
}

/// Deletes every resume. The backend's warning is carried verbatim —
/// callers must confirm with the user before invoking this.
pub async fn delete_all_summary(api: &dyn RecruitApi) -> Result<Vec<String>, AppError> {
    let response = api.delete_all_resumes().await?;
    let mut lines = vec![format!(
        "Deleted {} database record(s), removed {} file(s) and {} directorie(s)",
        response.database_records_deleted, response.files_removed, response.directories_removed
    )];
    if !response.warning.is_empty() {
        lines.push(response.warning);
    }
    Ok(lines)
}
