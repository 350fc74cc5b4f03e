//! API-client boundary — the typed contract for every backend call.
//!
//! ARCHITECTURAL RULE: no other module may talk to the recruiting backend
//! directly. All network access goes through `RecruitApi`, so the
//! orchestrator and settings layers can be exercised against an in-memory
//! implementation in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;

pub mod http;

pub use http::HttpApi;

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

/// One input file submitted for processing.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Response from the upload/extraction endpoint for one file.
/// Everything beyond `status` is optional structure — older backend
/// versions omit whole sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    #[serde(default)]
    pub candidate_id: Option<String>,
    #[serde(default)]
    pub version_number: Option<u32>,
    #[serde(default)]
    pub extraction_method: Option<String>,
    #[serde(default)]
    pub content_length: Option<u64>,
    #[serde(default)]
    pub processing_details: Option<ProcessingDetails>,
    #[serde(default)]
    pub changes_made: Option<ChangesMade>,
    /// Opaque — no display contract; logged at debug level only.
    #[serde(default)]
    pub cleanup_result: Option<Value>,
}

/// Per-stage AI metrics reported by the backend for one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingDetails {
    #[serde(default)]
    pub extraction_model: Option<String>,
    #[serde(default)]
    pub extraction_tokens: Option<u64>,
    #[serde(default)]
    pub extraction_seconds: Option<f64>,
    #[serde(default)]
    pub validation_model: Option<String>,
    #[serde(default)]
    pub validation_tokens: Option<u64>,
    #[serde(default)]
    pub validation_seconds: Option<f64>,
}

/// Human-readable change descriptions from the validation stage,
/// keyed by category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangesMade {
    #[serde(default)]
    pub work_experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub contact: Vec<String>,
}

impl ChangesMade {
    /// Categories in display order, with their labels.
    pub fn categories(&self) -> [(&'static str, &[String]); 3] {
        [
            ("Work experience", self.work_experience.as_slice()),
            ("Education", self.education.as_slice()),
            ("Contact", self.contact.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.categories().iter().all(|(_, items)| items.is_empty())
    }
}

/// One resume record as reported by the backend. Only the id is a firm
/// contract; everything else is ambiguously-shaped and goes through the
/// normalizer at display time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Resume {
    pub fn record(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// Kinds of resume sub-records the backend serves separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubrecordKind {
    Education,
    Experience,
    Skills,
}

impl SubrecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubrecordKind::Education => "education",
            SubrecordKind::Experience => "experience",
            SubrecordKind::Skills => "skills",
        }
    }
}

/// One configured AI agent and the models it offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub name: String,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response from the agents listing endpoint. This is the single source
/// of truth for the current agent/model pairing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentsResponse {
    #[serde(default)]
    pub current_agent: Option<String>,
    #[serde(default)]
    pub current_model: Option<String>,
    #[serde(default)]
    pub available_agents: Vec<AgentInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectAgentResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestAgentResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReprocessResult {
    pub resume_id: String,
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReprocessResponse {
    pub requested: u32,
    pub successful: u32,
    #[serde(default)]
    pub results: Vec<ReprocessResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupResponse {
    pub cleaned: u64,
    pub kept: u64,
    #[serde(default)]
    pub candidates_processed: Option<u64>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAllResponse {
    pub database_records_deleted: u64,
    pub files_removed: u64,
    pub directories_removed: u64,
    #[serde(default)]
    pub counts_before_deletion: Value,
    #[serde(default)]
    pub warning: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The backend client trait. Implement this to swap the transport without
/// touching the orchestrator, settings, or admin code.
///
/// Production: `HttpApi`. Tests: in-memory mocks.
#[async_trait]
pub trait RecruitApi: Send + Sync {
    /// Submits one file for upload and (optionally) AI extraction/validation.
    /// One file per call — the backend is not safe for concurrent
    /// multi-file submission from one client session.
    async fn upload_resume(
        &self,
        file: &UploadFile,
        use_ai_extraction: bool,
    ) -> Result<UploadResponse, AppError>;

    async fn list_resumes(&self) -> Result<Vec<Resume>, AppError>;

    async fn search_resumes(&self, query: &str) -> Result<Vec<Resume>, AppError>;

    async fn get_resume_subrecords(
        &self,
        resume_id: &str,
        kind: SubrecordKind,
    ) -> Result<Vec<Value>, AppError>;

    async fn get_ai_agents(&self) -> Result<AgentsResponse, AppError>;

    async fn select_ai_agent(
        &self,
        agent: &str,
        model: Option<&str>,
    ) -> Result<SelectAgentResponse, AppError>;

    async fn test_ai_agent(
        &self,
        agent: &str,
        model: Option<&str>,
    ) -> Result<TestAgentResponse, AppError>;

    async fn reprocess_resumes(&self, ids: &[String]) -> Result<ReprocessResponse, AppError>;

    async fn cleanup_old_versions(&self, keep_count: u32) -> Result<CleanupResponse, AppError>;

    async fn delete_all_resumes(&self) -> Result<DeleteAllResponse, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
