pub mod anthropic;
#[cfg(test)]
pub mod fake;
pub mod wire;

use crate::error::{AppError, Result};
use crate::types::report::EvaluationResult;
use async_trait::async_trait;

pub use anthropic::MessagesClient;

/// What the pipeline needs from the remote reasoning service.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Free-text market research; may use web search.
    async fn research(&self, prompt: &str) -> Result<String>;

    /// One structured qualitative evaluation.
    async fn evaluate(&self, prompt: &str) -> Result<EvaluationResult>;

    fn provider_name(&self) -> &'static str;
}

/// Removes ```` ```json ```` and ```` ``` ```` markers anywhere in `raw`, then trims.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

pub fn parse_evaluation(raw: &str) -> Result<EvaluationResult> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|e| AppError::ContractViolation(e.to_string()))
}
