use super::{parse_evaluation, ReasoningService};
use crate::error::{AppError, Result};
use crate::types::report::EvaluationResult;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Deterministic stand-in: research answers with a fixed outcome and each
/// `evaluate` call pops the next scripted raw response.
#[derive(Debug)]
pub struct FakeService {
    research: std::result::Result<String, String>,
    passes: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeService {
    pub fn new(passes: Vec<String>) -> Self {
        Self {
            research: Ok("- Market growing 20% YoY".to_string()),
            passes: Mutex::new(passes.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_research(mut self, text: &str) -> Self {
        self.research = Ok(text.to_string());
        self
    }

    pub fn with_failing_research(mut self, message: &str) -> Self {
        self.research = Err(message.to_string());
        self
    }

    /// Every prompt seen, research first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log lock").clone()
    }

    fn record(&self, prompt: &str) {
        self.prompts
            .lock()
            .expect("prompt log lock")
            .push(prompt.to_string());
    }
}

#[async_trait]
impl ReasoningService for FakeService {
    async fn research(&self, prompt: &str) -> Result<String> {
        self.record(prompt);
        self.research.clone().map_err(AppError::Transport)
    }

    async fn evaluate(&self, prompt: &str) -> Result<EvaluationResult> {
        self.record(prompt);
        let raw = self
            .passes
            .lock()
            .expect("pass script lock")
            .pop_front()
            .ok_or_else(|| AppError::Transport("no scripted pass left".to_string()))?;
        parse_evaluation(&raw)
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
