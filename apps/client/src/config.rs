use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the recruiting backend, e.g. `http://localhost:8000`.
    pub api_base_url: String,
    /// Whether uploads request the AI extraction/validation stages.
    pub use_ai_extraction: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: require_env("API_BASE_URL")?,
            use_ai_extraction: std::env::var("USE_AI_EXTRACTION")
                .unwrap_or_else(|_| "true".to_string())
                .parse::<bool>()
                .context("USE_AI_EXTRACTION must be 'true' or 'false'")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
