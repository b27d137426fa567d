use crate::error::AppError;
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_PROXY_BIND: &str = "127.0.0.1:8787";
pub const DEFAULT_PROXY_ROUTE: &str = "/api/claude";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub service: Option<ServiceConfig>,
    pub proxy: Option<ProxyConfig>,
    pub blend: Option<BlendConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    pub bind: Option<String>,
    pub route: Option<String>,
    pub upstream: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlendConfig {
    pub heuristic: Option<f64>,
    pub pass_1: Option<f64>,
    pub pass_2: Option<f64>,
}

/// Resolved reasoning-service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub bind: String,
    pub route: String,
    pub upstream: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub heuristic: f64,
    pub pass_1: f64,
    pub pass_2: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            heuristic: 0.2,
            pass_1: 0.4,
            pass_2: 0.4,
        }
    }
}

impl BlendWeights {
    pub fn methodology(&self) -> String {
        format!(
            "Hybrid: {:.0}% Algorithm + {:.0}% AI Pass 1 + {:.0}% AI Pass 2",
            self.heuristic * 100.0,
            self.pass_1 * 100.0,
            self.pass_2 * 100.0
        )
    }
}

impl AppConfig {
    pub fn service(&self) -> ServiceSettings {
        let service = self.service.as_ref();
        ServiceSettings {
            endpoint: service
                .and_then(|s| s.endpoint.clone())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: service
                .and_then(|s| s.model.clone())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: service
                .and_then(|s| s.max_tokens)
                .unwrap_or(DEFAULT_MAX_TOKENS),
            timeout_secs: service
                .and_then(|s| s.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn proxy(&self) -> ProxySettings {
        let proxy = self.proxy.as_ref();
        ProxySettings {
            bind: proxy
                .and_then(|p| p.bind.clone())
                .unwrap_or_else(|| DEFAULT_PROXY_BIND.to_string()),
            route: proxy
                .and_then(|p| p.route.clone())
                .unwrap_or_else(|| DEFAULT_PROXY_ROUTE.to_string()),
            upstream: proxy
                .and_then(|p| p.upstream.clone())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }

    pub fn weights(&self) -> BlendWeights {
        let defaults = BlendWeights::default();
        match &self.blend {
            Some(blend) => BlendWeights {
                heuristic: blend.heuristic.unwrap_or(defaults.heuristic),
                pass_1: blend.pass_1.unwrap_or(defaults.pass_1),
                pass_2: blend.pass_2.unwrap_or(defaults.pass_2),
            },
            None => defaults,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let weights = self.weights();
        let values = [weights.heuristic, weights.pass_1, weights.pass_2];
        if values.iter().any(|weight| !(0.0..=1.0).contains(weight)) {
            return Err(AppError::ConfigParse(
                "blend weights must be between 0.0 and 1.0".to_string(),
            ));
        }
        let weight_sum: f64 = values.iter().sum();
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(AppError::ConfigParse(format!(
                "blend weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        let service = self.service();
        if service.endpoint.trim().is_empty() {
            return Err(AppError::ConfigParse(
                "service.endpoint cannot be empty".to_string(),
            ));
        }
        if service.model.trim().is_empty() {
            return Err(AppError::ConfigParse(
                "service.model cannot be empty".to_string(),
            ));
        }
        if service.max_tokens == 0 {
            return Err(AppError::ConfigParse(
                "service.max_tokens must be greater than 0".to_string(),
            ));
        }
        if service.timeout_secs == 0 {
            return Err(AppError::ConfigParse(
                "service.timeout_secs must be greater than 0".to_string(),
            ));
        }

        let proxy = self.proxy();
        if proxy.upstream.trim().is_empty() {
            return Err(AppError::ConfigParse(
                "proxy.upstream cannot be empty".to_string(),
            ));
        }
        if !proxy.route.starts_with('/') {
            return Err(AppError::ConfigParse(format!(
                "proxy.route must start with '/': {}",
                proxy.route
            )));
        }

        Ok(())
    }
}
