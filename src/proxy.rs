//! Credential-injecting pass-through to the Messages API.
//!
//! Browsers and other clients without the secret POST a messages request to
//! the configured route; the proxy keeps the known fields, fills in the model
//! defaults, adds the credential and version headers and relays the upstream
//! answer unchanged.

use crate::error::{AppError, Result};
use crate::llm::wire::API_VERSION;
use crate::types::config::{ProxySettings, ServiceSettings};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::Read;
use std::time::Duration;
use tracing::{info, warn};

const USER_AGENT_VALUE: &str = concat!("launchscore-proxy/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: String,
}

impl ProxyResponse {
    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }).to_string(),
        }
    }
}

/// The subset of an incoming request that is forwarded.
#[derive(Debug, Default, Deserialize)]
struct InboundRequest {
    #[serde(default)]
    model: Option<Value>,
    #[serde(default)]
    max_tokens: Option<Value>,
    #[serde(default)]
    messages: Option<Value>,
    #[serde(default)]
    tools: Option<Value>,
}

#[derive(Debug, Serialize)]
struct UpstreamRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    messages: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Value>,
}

pub struct Proxy {
    route: String,
    upstream: String,
    model: String,
    max_tokens: u32,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

impl Proxy {
    pub fn new(
        proxy: &ProxySettings,
        service: &ServiceSettings,
        api_key: Option<String>,
    ) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(service.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| AppError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            route: proxy.route.clone(),
            upstream: proxy.upstream.clone(),
            model: service.model.clone(),
            max_tokens: service.max_tokens,
            api_key,
            client,
        })
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Maps one request to its response. Never fails: every problem becomes
    /// a JSON error body with the matching status.
    pub fn handle(&self, method: &str, url: &str, body: &str) -> ProxyResponse {
        let path = url.split('?').next().unwrap_or_default();
        if path != self.route {
            return ProxyResponse::error(404, "Not found");
        }
        if !method.eq_ignore_ascii_case("POST") {
            return ProxyResponse::error(405, "Method not allowed");
        }
        let Some(api_key) = self.api_key.as_deref() else {
            return ProxyResponse::error(500, &AppError::MissingCredential.to_string());
        };
        let inbound: InboundRequest = match serde_json::from_str(body) {
            Ok(inbound) => inbound,
            Err(e) => {
                warn!(error = %e, "rejecting malformed proxy body");
                return ProxyResponse::error(400, "Invalid JSON body");
            }
        };

        match self.forward(api_key, self.upstream_request(inbound)) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, upstream = %self.upstream, "upstream call failed");
                ProxyResponse::error(500, "Failed to call Anthropic API")
            }
        }
    }

    fn upstream_request(&self, inbound: InboundRequest) -> UpstreamRequest {
        UpstreamRequest {
            model: inbound
                .model
                .as_ref()
                .and_then(Value::as_str)
                .filter(|model| !model.is_empty())
                .map_or_else(|| self.model.clone(), str::to_string),
            max_tokens: inbound
                .max_tokens
                .as_ref()
                .and_then(Value::as_u64)
                .and_then(|tokens| u32::try_from(tokens).ok())
                .filter(|tokens| *tokens > 0)
                .unwrap_or(self.max_tokens),
            messages: inbound.messages,
            tools: inbound.tools.filter(|tools| !tools.is_null()),
        }
    }

    fn forward(&self, api_key: &str, request: UpstreamRequest) -> Result<ProxyResponse> {
        let response = self
            .client
            .post(&self.upstream)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()?;
        let status = response.status().as_u16();
        let text = response.text()?;
        // Only JSON is relayed.
        serde_json::from_str::<Value>(&text)?;
        Ok(ProxyResponse { status, body: text })
    }

    /// Serves requests one at a time until the listener shuts down.
    pub fn run(&self, server: tiny_http::Server) {
        for mut request in server.incoming_requests() {
            let method = request.method().as_str().to_string();
            let url = request.url().to_string();

            let mut body = String::new();
            let response = match request.as_reader().read_to_string(&mut body) {
                Ok(_) => self.handle(&method, &url, &body),
                Err(_) => ProxyResponse::error(400, "Invalid JSON body"),
            };
            info!(%method, %url, status = response.status, "proxied request");

            let mut reply =
                tiny_http::Response::from_string(response.body).with_status_code(response.status);
            if let Ok(header) = tiny_http::Header::from_bytes("Content-Type", "application/json") {
                reply = reply.with_header(header);
            }
            if let Err(e) = request.respond(reply) {
                warn!(error = %e, "failed to write proxy response");
            }
        }
    }
}

pub fn bind(address: &str) -> Result<tiny_http::Server> {
    tiny_http::Server::http(address)
        .map_err(|e| AppError::Io(std::io::Error::other(format!("failed to bind {address}: {e}"))))
}
