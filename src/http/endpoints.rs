use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::client::ApiClient;
use crate::error::{AppResult, display_chain};

/// Number of body characters kept for a probe report.
pub const BODY_EXCERPT_CHARS: usize = 200;

/// Outcome of one probe request. Either `status_code` and `body_excerpt` are
/// set, or `error` is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResponse {
    #[must_use]
    pub fn success(status_code: u16, body: &str) -> Self {
        Self {
            status_code: Some(status_code),
            body_excerpt: Some(excerpt(body)),
            error: None,
        }
    }

    #[must_use]
    pub const fn failure(error: String) -> Self {
        Self {
            status_code: None,
            body_excerpt: None,
            error: Some(error),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// First [`BODY_EXCERPT_CHARS`] characters of `body`.
#[must_use]
pub fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointReport {
    pub name: &'static str,
    pub method: &'static str,
    pub path: &'static str,
    #[serde(flatten)]
    pub response: ProbeResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

impl ChatCompletionRequest {
    /// Single user message, non-streaming.
    #[must_use]
    pub fn user_message(model: &str, content: &str) -> Self {
        Self {
            model: model.to_owned(),
            messages: vec![ChatMessage {
                role: "user".to_owned(),
                content: content.to_owned(),
            }],
            stream: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProbePlan {
    pub request_timeout: Duration,
    pub chat_timeout: Duration,
    pub model: String,
    pub prompt: String,
}

/// Probes `/`, `/v1/models` and `/v1/chat/completions` in that order. A
/// failing endpoint never stops the remaining probes.
pub async fn probe_endpoints(client: &ApiClient, plan: &ProbePlan) -> Vec<EndpointReport> {
    let root = capture(client.get_with_timeout("/", plan.request_timeout).await).await;
    let models = capture(client.get_with_timeout("/v1/models", plan.request_timeout).await).await;
    let payload = ChatCompletionRequest::user_message(&plan.model, &plan.prompt);
    let sent = client.post_json("/v1/chat/completions", &payload, plan.chat_timeout).await;
    let chat = capture(sent).await;

    vec![
        EndpointReport {
            name: "root_endpoint",
            method: "GET",
            path: "/",
            response: root,
        },
        EndpointReport {
            name: "models_endpoint",
            method: "GET",
            path: "/v1/models",
            response: models,
        },
        EndpointReport {
            name: "chat_endpoint",
            method: "POST",
            path: "/v1/chat/completions",
            response: chat,
        },
    ]
}

async fn capture(result: AppResult<reqwest::Response>) -> ProbeResponse {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            debug!("Probe request failed: {}", err);
            return ProbeResponse::failure(display_chain(&err));
        }
    };
    let status = response.status().as_u16();
    match response.text().await {
        Ok(body) => ProbeResponse::success(status, &body),
        Err(err) => {
            debug!("Probe body read failed: {}", err);
            ProbeResponse::failure(display_chain(&err))
        }
    }
}
