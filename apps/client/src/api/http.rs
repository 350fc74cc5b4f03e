//! HTTP implementation of `RecruitApi` over reqwest.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use async_trait::async_trait;

use crate::api::{
    AgentsResponse, CleanupResponse, DeleteAllResponse, RecruitApi, ReprocessResponse, Resume,
    SelectAgentResponse, SubrecordKind, TestAgentResponse, UploadFile, UploadResponse,
};
use crate::errors::AppError;

/// Upload + extraction of a large resume can take a while; keep the
/// timeout generous rather than retrying (per-unit retry is a distinct
/// user action, not a transport concern).
const REQUEST_TIMEOUT_SECS: u64 = 180;

/// The production backend client. One reqwest `Client`, JSON everywhere,
/// multipart only for the file upload.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Maps a backend response to a typed value, turning non-2xx statuses
/// into `AppError::Api` with a best-effort parsed message.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Api {
            status: status.as_u16(),
            message: parse_error_message(&body),
        });
    }
    Ok(response.json::<T>().await?)
}

/// Backends differ on error envelopes; probe the common ones before
/// falling back to the raw body.
fn parse_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for probe in [
            value.get("detail"),
            value.get("error").and_then(|e| e.get("message")),
            value.get("message"),
        ] {
            if let Some(message) = probe.and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    body.to_string()
}

#[async_trait]
impl RecruitApi for HttpApi {
    async fn upload_resume(
        &self,
        file: &UploadFile,
        use_ai_extraction: bool,
    ) -> Result<UploadResponse, AppError> {
        debug!(
            "Uploading {} ({} bytes, use_ai_extraction={})",
            file.filename,
            file.size(),
            use_ai_extraction
        );
        let form = Form::new()
            .part(
                "file",
                Part::bytes(file.bytes.clone()).file_name(file.filename.clone()),
            )
            .text("use_ai_extraction", use_ai_extraction.to_string());

        let response = self
            .client
            .post(self.url("/api/resumes/upload"))
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }

    async fn list_resumes(&self) -> Result<Vec<Resume>, AppError> {
        let response = self.client.get(self.url("/api/resumes")).send().await?;
        read_json(response).await
    }

    async fn search_resumes(&self, query: &str) -> Result<Vec<Resume>, AppError> {
        let response = self
            .client
            .get(self.url("/api/resumes/search"))
            .query(&[("q", query)])
            .send()
            .await?;
        read_json(response).await
    }

    async fn get_resume_subrecords(
        &self,
        resume_id: &str,
        kind: SubrecordKind,
    ) -> Result<Vec<Value>, AppError> {
        let response = self
            .client
            .get(self.url(&format!("/api/resumes/{resume_id}/{}", kind.as_str())))
            .send()
            .await?;
        read_json(response).await
    }

    async fn get_ai_agents(&self) -> Result<AgentsResponse, AppError> {
        let response = self.client.get(self.url("/api/ai-agents")).send().await?;
        read_json(response).await
    }

    async fn select_ai_agent(
        &self,
        agent: &str,
        model: Option<&str>,
    ) -> Result<SelectAgentResponse, AppError> {
        let response = self
            .client
            .post(self.url("/api/ai-agents/select"))
            .json(&json!({ "agent": agent, "model": model }))
            .send()
            .await?;
        read_json(response).await
    }

    async fn test_ai_agent(
        &self,
        agent: &str,
        model: Option<&str>,
    ) -> Result<TestAgentResponse, AppError> {
        let response = self
            .client
            .post(self.url("/api/ai-agents/test"))
            .json(&json!({ "agent": agent, "model": model }))
            .send()
            .await?;
        read_json(response).await
    }

    async fn reprocess_resumes(&self, ids: &[String]) -> Result<ReprocessResponse, AppError> {
        let response = self
            .client
            .post(self.url("/api/resumes/reprocess"))
            .json(&json!({ "resume_ids": ids }))
            .send()
            .await?;
        read_json(response).await
    }

    async fn cleanup_old_versions(&self, keep_count: u32) -> Result<CleanupResponse, AppError> {
        let response = self
            .client
            .post(self.url("/api/maintenance/cleanup"))
            .json(&json!({ "keep_count": keep_count }))
            .send()
            .await?;
        read_json(response).await
    }

    async fn delete_all_resumes(&self) -> Result<DeleteAllResponse, AppError> {
        let response = self.client.delete(self.url("/api/resumes")).send().await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = HttpApi::new("http://localhost:8000/");
        assert_eq!(api.url("/api/resumes"), "http://localhost:8000/api/resumes");
    }

    #[test]
    fn test_parse_error_message_detail_envelope() {
        assert_eq!(
            parse_error_message(r#"{"detail": "No file provided"}"#),
            "No file provided"
        );
    }

    #[test]
    fn test_parse_error_message_nested_error_envelope() {
        assert_eq!(
            parse_error_message(r#"{"error": {"code": "X", "message": "Agent not found"}}"#),
            "Agent not found"
        );
    }

    #[test]
    fn test_parse_error_message_falls_back_to_body() {
        assert_eq!(parse_error_message("upstream timeout"), "upstream timeout");
    }
}
