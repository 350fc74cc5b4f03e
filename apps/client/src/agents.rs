//! AI-agent selection — the agent/model pairing the pipeline reports into
//! per-file outcomes.
//!
//! Source of truth: the agents-list endpoint. The connectivity-test
//! endpoint is a user-initiated check only; the model it reports is shown
//! in the test message but never written back into the selection. (An
//! earlier design inferred the current model from the test endpoint as a
//! side channel; one source keeps sync deterministic.)

use tracing::info;

use crate::api::{AgentInfo, RecruitApi};
use crate::errors::AppError;

/// The current agent/model pairing plus the advertised catalogue.
#[derive(Debug, Clone, Default)]
pub struct AgentSelection {
    pub current_agent: Option<String>,
    pub current_model: Option<String>,
    pub available: Vec<AgentInfo>,
}

impl AgentSelection {
    /// True when an agent is configured and a batch may start.
    pub fn is_configured(&self) -> bool {
        self.current_agent.is_some()
    }

    /// Models advertised for the named agent.
    pub fn models_for(&self, agent: &str) -> &[String] {
        self.available
            .iter()
            .find(|a| a.name == agent)
            .map(|a| a.models.as_slice())
            .unwrap_or(&[])
    }
}

/// Fetches the agent catalogue and current pairing from the backend.
/// A failure here is a run-level configuration error — without an agent
/// list there is nothing to process with.
pub async fn sync_with_backend(api: &dyn RecruitApi) -> Result<AgentSelection, AppError> {
    let response = api.get_ai_agents().await?;
    info!(
        "Agent sync: current={:?} model={:?}, {} available",
        response.current_agent,
        response.current_model,
        response.available_agents.len()
    );
    Ok(AgentSelection {
        current_agent: response.current_agent,
        current_model: response.current_model,
        available: response.available_agents,
    })
}

/// Applies an agent/model choice. On reported success the local selection
/// is updated in place, mirroring what a follow-up sync would read.
pub async fn select_agent(
    api: &dyn RecruitApi,
    selection: &mut AgentSelection,
    agent: &str,
    model: Option<&str>,
) -> Result<String, AppError> {
    let response = api.select_ai_agent(agent, model).await?;
    if response.status != "success" {
        return Err(AppError::Validation(
            response
                .message
                .unwrap_or_else(|| format!("Backend refused agent '{agent}'")),
        ));
    }
    selection.current_agent = Some(agent.to_string());
    selection.current_model = model.map(str::to_string);
    Ok(response
        .message
        .unwrap_or_else(|| format!("Agent set to {agent}")))
}

/// User-initiated connectivity test. Returns a display message; never
/// mutates the selection.
pub async fn test_agent(
    api: &dyn RecruitApi,
    agent: &str,
    model: Option<&str>,
) -> Result<String, AppError> {
    let response = api.test_ai_agent(agent, model).await?;
    let reported = response.model.as_deref().unwrap_or("unknown model");
    if response.success {
        Ok(format!("{agent} responded ({reported}): {}", response.message))
    } else {
        Ok(format!("{agent} test failed: {}", response.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        AgentsResponse, CleanupResponse, DeleteAllResponse, ReprocessResponse, Resume,
        SelectAgentResponse, SubrecordKind, TestAgentResponse, UploadFile, UploadResponse,
    };
    use async_trait::async_trait;
    use serde_json::Value;

    /// Minimal mock: only the agent endpoints answer; the rest are
    /// unreachable in these tests.
    struct AgentsOnlyApi {
        agents: AgentsResponse,
        select_status: &'static str,
        test_model: Option<String>,
    }

    #[async_trait]
    impl RecruitApi for AgentsOnlyApi {
        async fn upload_resume(
            &self,
            _file: &UploadFile,
            _use_ai_extraction: bool,
        ) -> Result<UploadResponse, AppError> {
            unreachable!("not exercised")
        }
        async fn list_resumes(&self) -> Result<Vec<Resume>, AppError> {
            unreachable!("not exercised")
        }
        async fn search_resumes(&self, _query: &str) -> Result<Vec<Resume>, AppError> {
            unreachable!("not exercised")
        }
        async fn get_resume_subrecords(
            &self,
            _resume_id: &str,
            _kind: SubrecordKind,
        ) -> Result<Vec<Value>, AppError> {
            unreachable!("not exercised")
        }
        async fn get_ai_agents(&self) -> Result<AgentsResponse, AppError> {
            Ok(self.agents.clone())
        }
        async fn select_ai_agent(
            &self,
            _agent: &str,
            _model: Option<&str>,
        ) -> Result<SelectAgentResponse, AppError> {
            Ok(SelectAgentResponse {
                status: self.select_status.to_string(),
                message: None,
            })
        }
        async fn test_ai_agent(
            &self,
            _agent: &str,
            _model: Option<&str>,
        ) -> Result<TestAgentResponse, AppError> {
            Ok(TestAgentResponse {
                success: true,
                message: "pong".to_string(),
                model: self.test_model.clone(),
            })
        }
        async fn reprocess_resumes(&self, _ids: &[String]) -> Result<ReprocessResponse, AppError> {
            unreachable!("not exercised")
        }
        async fn cleanup_old_versions(
            &self,
            _keep_count: u32,
        ) -> Result<CleanupResponse, AppError> {
            unreachable!("not exercised")
        }
        async fn delete_all_resumes(&self) -> Result<DeleteAllResponse, AppError> {
            unreachable!("not exercised")
        }
    }

    fn catalogue() -> AgentsResponse {
        AgentsResponse {
            current_agent: Some("ollama".to_string()),
            current_model: Some("llama3".to_string()),
            available_agents: vec![AgentInfo {
                name: "ollama".to_string(),
                models: vec!["llama3".to_string(), "mistral".to_string()],
                description: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_sync_trusts_agents_list_for_current_model() {
        let api = AgentsOnlyApi {
            agents: catalogue(),
            select_status: "success",
            // The test endpoint would report a different model; sync must
            // never consult it.
            test_model: Some("other-model".to_string()),
        };
        let selection = sync_with_backend(&api).await.unwrap();
        assert_eq!(selection.current_model.as_deref(), Some("llama3"));
        assert!(selection.is_configured());
    }

    #[tokio::test]
    async fn test_test_agent_does_not_mutate_selection() {
        let api = AgentsOnlyApi {
            agents: catalogue(),
            select_status: "success",
            test_model: Some("mistral".to_string()),
        };
        let selection = sync_with_backend(&api).await.unwrap();
        let message = test_agent(&api, "ollama", None).await.unwrap();
        assert!(message.contains("mistral"));
        assert_eq!(selection.current_model.as_deref(), Some("llama3"));
    }

    #[tokio::test]
    async fn test_select_agent_updates_local_selection() {
        let api = AgentsOnlyApi {
            agents: catalogue(),
            select_status: "success",
            test_model: None,
        };
        let mut selection = sync_with_backend(&api).await.unwrap();
        select_agent(&api, &mut selection, "ollama", Some("mistral"))
            .await
            .unwrap();
        assert_eq!(selection.current_model.as_deref(), Some("mistral"));
    }

    #[tokio::test]
    async fn test_select_agent_refusal_is_validation_error() {
        let api = AgentsOnlyApi {
            agents: catalogue(),
            select_status: "error",
            test_model: None,
        };
        let mut selection = AgentSelection::default();
        let result = select_agent(&api, &mut selection, "missing", None).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(!selection.is_configured());
    }

    #[test]
    fn test_models_for_unknown_agent_is_empty() {
        let selection = AgentSelection::default();
        assert!(selection.models_for("nope").is_empty());
    }
}
