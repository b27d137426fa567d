use crate::blend;
use crate::error::Result;
use crate::heuristic;
use crate::llm::ReasoningService;
use crate::prompt;
use crate::types::config::BlendWeights;
use crate::types::input::FounderInput;
use crate::types::report::{BlendedResult, EvaluationResult};
use chrono::Utc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Research,
    Algorithm,
    AiPass1,
    AiPass2,
    Blending,
}

impl AnalysisPhase {
    pub const ALL: [AnalysisPhase; 5] = [
        AnalysisPhase::Research,
        AnalysisPhase::Algorithm,
        AnalysisPhase::AiPass1,
        AnalysisPhase::AiPass2,
        AnalysisPhase::Blending,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::Algorithm => "algorithm",
            Self::AiPass1 => "ai_pass_1",
            Self::AiPass2 => "ai_pass_2",
            Self::Blending => "blending",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Research => "Researching Market Data",
            Self::Algorithm => "Running Algorithm",
            Self::AiPass1 => "AI Evaluation - Pass 1",
            Self::AiPass2 => "AI Evaluation - Pass 2",
            Self::Blending => "Blending Scores",
        }
    }
}

/// Market research, heuristic score, two independent passes, blend.
///
/// Remote calls run strictly one after another. Research failures degrade to
/// [`prompt::MARKET_FALLBACK`]; pass failures abort the evaluation.
pub async fn evaluate<S, F>(
    input: &FounderInput,
    service: &S,
    weights: &BlendWeights,
    mut on_phase: F,
) -> Result<BlendedResult>
where
    S: ReasoningService + ?Sized,
    F: FnMut(AnalysisPhase),
{
    info!(
        idea = %input.idea_name,
        provider = service.provider_name(),
        "starting evaluation"
    );

    on_phase(AnalysisPhase::Research);
    let market_intel = match service.research(&prompt::research_prompt(input)).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "market research skipped");
            prompt::MARKET_FALLBACK.to_string()
        }
    };

    on_phase(AnalysisPhase::Algorithm);
    let card = heuristic::score(input);
    info!(total = card.total(), "heuristic pre-score computed");

    on_phase(AnalysisPhase::AiPass1);
    let pass_1 = run_pass(service, 1, input, &market_intel, &card).await?;

    on_phase(AnalysisPhase::AiPass2);
    let pass_2 = run_pass(service, 2, input, &market_intel, &card).await?;

    on_phase(AnalysisPhase::Blending);
    let result = blend::blend(
        &input.idea_name,
        weights,
        &card,
        &pass_1,
        &pass_2,
        Utc::now().to_rfc3339(),
    );
    info!(
        score = result.score,
        disposition = %result.kill_or_continue,
        confidence = result.meta.confidence.as_str(),
        "evaluation blended"
    );
    Ok(result)
}

async fn run_pass<S>(
    service: &S,
    pass: u8,
    input: &FounderInput,
    market_intel: &str,
    card: &crate::types::scoring::ScoreCard,
) -> Result<EvaluationResult>
where
    S: ReasoningService + ?Sized,
{
    let prompt = prompt::evaluation_prompt(pass, input, market_intel, card);
    match service.evaluate(&prompt).await {
        Ok(result) => {
            info!(pass, score = result.score, "evaluation pass completed");
            Ok(result)
        }
        Err(e) => {
            error!(pass, error = %e, "evaluation pass failed");
            Err(e)
        }
    }
}
