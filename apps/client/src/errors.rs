use thiserror::Error;

/// Application-level error type.
/// Per-unit upload failures during a batch are NOT surfaced through this
/// enum — they are absorbed into the unit's outcome so the batch keeps
/// going. `AppError` is for run-level failures only: bad user input,
/// configuration problems, and calls made outside a batch loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
