use super::wire::{Message, MessagesRequest, MessagesResponse, Tool, API_VERSION};
use super::{parse_evaluation, ReasoningService};
use crate::error::{AppError, Result};
use crate::types::config::{ServiceSettings, DEFAULT_ENDPOINT};
use crate::types::report::EvaluationResult;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::debug;

const USER_AGENT_VALUE: &str = concat!("launchscore/", env!("CARGO_PKG_VERSION"));

/// Messages API client. Talks to the upstream directly when a credential is
/// configured, or to a credential-injecting proxy when it is not.
#[derive(Debug, Clone)]
pub struct MessagesClient {
    endpoint: String,
    model: String,
    max_tokens: u32,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl MessagesClient {
    pub fn new(settings: &ServiceSettings, api_key: Option<String>) -> Result<Self> {
        if api_key.is_none() && settings.endpoint == DEFAULT_ENDPOINT {
            return Err(AppError::MissingCredential);
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| AppError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            api_key,
            client,
        })
    }

    fn request(&self, prompt: &str, tools: Option<Vec<Tool>>) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message::user(prompt)],
            tools,
        }
    }

    pub async fn send(&self, request: &MessagesRequest) -> Result<MessagesResponse> {
        debug!(
            endpoint = %self.endpoint,
            prompt_chars = request.messages.iter().map(|m| m.content.len()).sum::<usize>(),
            tools = request.tools.is_some(),
            "sending messages request"
        );

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder
                .header("x-api-key", key)
                .header("anthropic-version", API_VERSION);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .get("error")
                .and_then(|error| error.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("API error {}", status.as_u16()));
            return Err(AppError::Transport(message));
        }

        response
            .json::<MessagesResponse>()
            .await
            .map_err(|e| AppError::ContractViolation(format!("malformed messages response: {e}")))
    }
}

#[async_trait]
impl ReasoningService for MessagesClient {
    async fn research(&self, prompt: &str) -> Result<String> {
        let response = self
            .send(&self.request(prompt, Some(vec![Tool::web_search()])))
            .await?;
        let text = response.joined_lines();
        if text.is_empty() {
            return Err(AppError::ContractViolation(
                "research response contained no text".to_string(),
            ));
        }
        Ok(text)
    }

    async fn evaluate(&self, prompt: &str) -> Result<EvaluationResult> {
        let response = self.send(&self.request(prompt, None)).await?;
        parse_evaluation(&response.joined_text())
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }
}
