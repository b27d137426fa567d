use crate::types::scoring::{null_as_default, total_score, Breakdown, Dimension, Score, ScoreCard};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Disposition {
    Continue,
    Pivot,
    Kill,
}

impl Disposition {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CONTINUE" => Some(Self::Continue),
            "PIVOT" => Some(Self::Pivot),
            "KILL" => Some(Self::Kill),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Continue => "CONTINUE",
            Self::Pivot => "PIVOT",
            Self::Kill => "KILL",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// One qualitative pass as returned by the reasoning service.
///
/// `score` and `breakdown` are required; everything else may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    #[serde(deserialize_with = "total_score")]
    pub score: Score,
    #[serde(deserialize_with = "null_as_default")]
    pub breakdown: Breakdown,
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
    #[serde(default)]
    pub weaknesses: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub market_insight: Option<String>,
    #[serde(default, deserialize_with = "lenient_disposition")]
    pub kill_or_continue: Option<Disposition>,
}

fn lenient_disposition<'de, D>(deserializer: D) -> Result<Option<Disposition>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Disposition::parse))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendMeta {
    pub algorithm_score: Score,
    pub ai_pass1_score: Score,
    pub ai_pass2_score: Score,
    pub confidence: Confidence,
    pub score_diff: Score,
    pub methodology: String,
    pub evaluated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendedResult {
    pub idea_name: String,
    pub score: Score,
    pub breakdown: Breakdown,
    pub verdict: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub market_insight: String,
    pub kill_or_continue: Disposition,
    pub meta: BlendMeta,
}

impl BlendedResult {
    pub fn tier(&self) -> &'static ScoreTier {
        ScoreTier::for_score(self.score)
    }
}

/// Offline result of the `score` command: the heuristic card alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeuristicReport {
    pub idea_name: String,
    pub score: Score,
    pub breakdown: ScoreCard,
    pub signals: Vec<DimensionSignals>,
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionSignals {
    pub dimension: Dimension,
    pub rules: Vec<&'static str>,
}

impl HeuristicReport {
    pub fn tier(&self) -> &'static ScoreTier {
        ScoreTier::for_score(self.score)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTier {
    pub min: Score,
    pub max: Score,
    pub label: &'static str,
    pub verdict: &'static str,
}

pub static SCORE_TIERS: [ScoreTier; 5] = [
    ScoreTier {
        min: 0,
        max: 299,
        label: "ABORT MISSION",
        verdict: "Stop. This idea needs a complete rethink.",
    },
    ScoreTier {
        min: 300,
        max: 499,
        label: "HIGH RISK",
        verdict: "Pause and reconsider. Major gaps exist.",
    },
    ScoreTier {
        min: 500,
        max: 699,
        label: "PROCEED WITH CAUTION",
        verdict: "Potential exists but needs significant refinement.",
    },
    ScoreTier {
        min: 700,
        max: 849,
        label: "GREEN LIGHT",
        verdict: "Strong foundation. Address the gaps and go build.",
    },
    ScoreTier {
        min: 850,
        max: 1000,
        label: "UNICORN POTENTIAL",
        verdict: "Exceptional. Execute fast before someone else does.",
    },
];

impl ScoreTier {
    /// Scores outside every band land in the first tier.
    pub fn for_score(score: Score) -> &'static ScoreTier {
        SCORE_TIERS
            .iter()
            .find(|tier| (tier.min..=tier.max).contains(&score))
            .unwrap_or(&SCORE_TIERS[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_result_parses_full_pass_response() {
        let pass: EvaluationResult = serde_json::from_str(
            r#"{
                "score": 640,
                "breakdown": {
                    "market": { "score": 150, "comment": "Large market." },
                    "problemFit": { "score": 130, "comment": "Clear pain." },
                    "competitive": { "score": 110, "comment": "Crowded." },
                    "revenue": { "score": 120, "comment": "SaaS." },
                    "team": { "score": 130, "comment": "Strong." }
                },
                "verdict": "Promising.",
                "strengths": ["a", "b", "c"],
                "weaknesses": ["d", "e", "f"],
                "recommendations": ["r1", "r2", "r3", "r4"],
                "marketInsight": "Growing 20% YoY.",
                "killOrContinue": "CONTINUE"
            }"#,
        )
        .expect("pass should parse");

        assert_eq!(pass.score, 640);
        assert_eq!(pass.breakdown.problem_fit.comment, "Clear pain.");
        assert_eq!(pass.market_insight.as_deref(), Some("Growing 20% YoY."));
        assert_eq!(pass.kill_or_continue, Some(Disposition::Continue));
    }

    #[test]
    fn evaluation_result_requires_score_and_breakdown() {
        let missing_breakdown = serde_json::from_str::<EvaluationResult>(r#"{"score": 400}"#);
        assert!(missing_breakdown.is_err());

        let missing_score = serde_json::from_str::<EvaluationResult>(r#"{"breakdown": {}}"#);
        assert!(missing_score.is_err());
    }

    #[test]
    fn null_optional_fields_do_not_reject_the_pass() {
        let pass: EvaluationResult = serde_json::from_str(
            r#"{
                "score": 500,
                "breakdown": { "market": null, "team": { "score": 90, "comment": null } },
                "verdict": null,
                "strengths": null,
                "recommendations": null,
                "killOrContinue": null
            }"#,
        )
        .expect("nulls should read as absent");

        assert_eq!(pass.score, 500);
        assert_eq!(pass.breakdown.market.score, 0);
        assert_eq!(pass.breakdown.team.score, 90);
        assert!(pass.recommendations.is_empty());
        assert_eq!(pass.verdict, None);
        assert_eq!(pass.strengths, None);
        assert_eq!(pass.kill_or_continue, None);
    }

    #[test]
    fn unknown_disposition_is_treated_as_absent() {
        let pass: EvaluationResult = serde_json::from_str(
            r#"{"score": 100, "breakdown": {}, "killOrContinue": "MAYBE"}"#,
        )
        .expect("pass should parse");
        assert_eq!(pass.kill_or_continue, None);

        let lowercase: EvaluationResult = serde_json::from_str(
            r#"{"score": 100, "breakdown": {}, "killOrContinue": "pivot"}"#,
        )
        .expect("pass should parse");
        assert_eq!(lowercase.kill_or_continue, Some(Disposition::Pivot));
    }

    #[test]
    fn tiers_cover_band_edges() {
        assert_eq!(ScoreTier::for_score(0).label, "ABORT MISSION");
        assert_eq!(ScoreTier::for_score(299).label, "ABORT MISSION");
        assert_eq!(ScoreTier::for_score(300).label, "HIGH RISK");
        assert_eq!(ScoreTier::for_score(699).label, "PROCEED WITH CAUTION");
        assert_eq!(ScoreTier::for_score(700).label, "GREEN LIGHT");
        assert_eq!(ScoreTier::for_score(850).label, "UNICORN POTENTIAL");
        assert_eq!(ScoreTier::for_score(1000).label, "UNICORN POTENTIAL");
        assert_eq!(ScoreTier::for_score(1001).label, "ABORT MISSION");
    }
}
