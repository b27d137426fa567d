//! Pure combination of the heuristic card and two qualitative passes.

use crate::types::config::BlendWeights;
use crate::types::report::{BlendMeta, BlendedResult, Confidence, Disposition, EvaluationResult};
use crate::types::scoring::{Breakdown, Dimension, Score, ScoreCard};

pub const MAX_RECOMMENDATIONS: usize = 6;

pub fn blend_dimension(
    weights: &BlendWeights,
    heuristic: Score,
    pass_1: Score,
    pass_2: Score,
) -> Score {
    let blended = f64::from(heuristic) * weights.heuristic
        + f64::from(pass_1) * weights.pass_1
        + f64::from(pass_2) * weights.pass_2;
    blended.round().max(0.0) as Score
}

/// Scores come from the weighted blend; comments from pass 1, else pass 2.
pub fn blend_breakdown(
    weights: &BlendWeights,
    heuristic: &ScoreCard,
    pass_1: &Breakdown,
    pass_2: &Breakdown,
) -> Breakdown {
    let mut breakdown = Breakdown::default();
    for dimension in Dimension::ALL {
        let first = pass_1.get(dimension);
        let second = pass_2.get(dimension);
        let slot = breakdown.get_mut(dimension);
        slot.score =
            blend_dimension(weights, heuristic.get(dimension), first.score, second.score);
        slot.comment = first_non_empty(&first.comment, &second.comment);
    }
    breakdown
}

/// Both KILL -> KILL; any PIVOT or a single KILL -> PIVOT; else CONTINUE.
///
/// A lone KILL vote is softened to PIVOT on purpose; do not escalate it.
pub fn resolve_disposition(
    vote_1: Option<Disposition>,
    vote_2: Option<Disposition>,
) -> Disposition {
    let votes = [vote_1, vote_2];
    let kills = votes
        .iter()
        .filter(|vote| **vote == Some(Disposition::Kill))
        .count();
    let pivots = votes
        .iter()
        .filter(|vote| **vote == Some(Disposition::Pivot))
        .count();

    if kills >= 2 {
        Disposition::Kill
    } else if pivots >= 1 || kills >= 1 {
        Disposition::Pivot
    } else {
        Disposition::Continue
    }
}

pub fn confidence(score_diff: Score) -> Confidence {
    if score_diff < 50 {
        Confidence::High
    } else if score_diff < 120 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Order-preserving union of both lists without duplicates, capped.
pub fn merge_recommendations(first: &[String], second: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for item in first.iter().chain(second) {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
    merged.truncate(MAX_RECOMMENDATIONS);
    merged
}

fn first_non_empty(first: &str, second: &str) -> String {
    if first.is_empty() {
        second.to_string()
    } else {
        first.to_string()
    }
}

fn pick_text(first: &Option<String>, second: &Option<String>) -> String {
    first_non_empty(
        first.as_deref().unwrap_or_default(),
        second.as_deref().unwrap_or_default(),
    )
}

fn pick_list(first: &Option<Vec<String>>, second: &Option<Vec<String>>) -> Vec<String> {
    first.clone().or_else(|| second.clone()).unwrap_or_default()
}

pub fn blend(
    idea_name: &str,
    weights: &BlendWeights,
    heuristic: &ScoreCard,
    pass_1: &EvaluationResult,
    pass_2: &EvaluationResult,
    evaluated_at: String,
) -> BlendedResult {
    let breakdown = blend_breakdown(weights, heuristic, &pass_1.breakdown, &pass_2.breakdown);
    // Deliberately the sum of blended dimensions, not a blend of the raw totals.
    let score = breakdown.total();
    let score_diff = pass_1.score.abs_diff(pass_2.score);

    BlendedResult {
        idea_name: idea_name.to_string(),
        score,
        breakdown,
        verdict: pick_text(&pass_1.verdict, &pass_2.verdict),
        strengths: pick_list(&pass_1.strengths, &pass_2.strengths),
        weaknesses: pick_list(&pass_1.weaknesses, &pass_2.weaknesses),
        recommendations: merge_recommendations(&pass_1.recommendations, &pass_2.recommendations),
        market_insight: pick_text(&pass_1.market_insight, &pass_2.market_insight),
        kill_or_continue: resolve_disposition(pass_1.kill_or_continue, pass_2.kill_or_continue),
        meta: BlendMeta {
            algorithm_score: heuristic.total(),
            ai_pass1_score: pass_1.score,
            ai_pass2_score: pass_2.score,
            confidence: confidence(score_diff),
            score_diff,
            methodology: weights.methodology(),
            evaluated_at,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::DimensionScore;
    use pretty_assertions::assert_eq;

    fn pass(score: Score, dims: [Score; 5], vote: Option<Disposition>) -> EvaluationResult {
        let mut breakdown = Breakdown::default();
        for (dimension, value) in Dimension::ALL.iter().zip(dims) {
            *breakdown.get_mut(*dimension) = DimensionScore {
                score: value,
                comment: format!("{} note", dimension.label()),
            };
        }
        EvaluationResult {
            score,
            breakdown,
            verdict: None,
            strengths: None,
            weaknesses: None,
            recommendations: Vec::new(),
            market_insight: None,
            kill_or_continue: vote,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn dimension_blend_is_rounded_weighted_average() {
        let weights = BlendWeights::default();
        assert_eq!(blend_dimension(&weights, 100, 150, 150), 140);
        // 0.2*33 + 0.4*101 + 0.4*0 = 47.0
        assert_eq!(blend_dimension(&weights, 33, 101, 0), 47);
        // 0.2*1 + 0.4*1 + 0.4*0 = 0.6
        assert_eq!(blend_dimension(&weights, 1, 1, 0), 1);
        // 0.2*2 = 0.4
        assert_eq!(blend_dimension(&weights, 2, 0, 0), 0);
        assert_eq!(blend_dimension(&weights, 200, 200, 200), 200);
    }

    #[test]
    fn absent_pass_dimensions_count_as_zero() {
        let heuristic = ScoreCard {
            market: 100,
            ..ScoreCard::default()
        };
        let first: EvaluationResult =
            serde_json::from_str(r#"{"score": 300, "breakdown": {"team": {"score": 150}}}"#)
                .expect("pass should parse");
        let second = pass(300, [100, 0, 0, 0, 100], None);

        let breakdown = blend_breakdown(
            &BlendWeights::default(),
            &heuristic,
            &first.breakdown,
            &second.breakdown,
        );
        assert_eq!(breakdown.market.score, 60);
        assert_eq!(breakdown.team.score, 100);
        assert_eq!(breakdown.problem_fit.score, 0);
    }

    #[test]
    fn total_is_sum_of_blended_dimensions_not_blend_of_totals() {
        let heuristic = ScoreCard {
            market: 50,
            problem_fit: 50,
            competitive: 50,
            revenue: 50,
            team: 50,
        };
        // Raw totals disagree with their own breakdowns on purpose.
        let first = pass(1000, [100, 100, 100, 100, 100], Some(Disposition::Continue));
        let second = pass(100, [100, 100, 100, 100, 100], Some(Disposition::Continue));

        let result = blend(
            "Idea",
            &BlendWeights::default(),
            &heuristic,
            &first,
            &second,
            String::new(),
        );

        // Each dimension: 0.2*50 + 0.4*100 + 0.4*100 = 90
        assert_eq!(result.breakdown.total(), 450);
        assert_eq!(result.score, 450);
        // A blend of the raw totals would give 0.2*250 + 0.4*1000 + 0.4*100 = 490.
        assert_ne!(result.score, 490);
        assert_eq!(result.meta.ai_pass1_score, 1000);
        assert_eq!(result.meta.algorithm_score, 250);
        assert_eq!(result.meta.confidence, Confidence::Low);
    }

    #[test]
    fn disposition_vote_table() {
        use Disposition::{Continue, Kill, Pivot};
        let cases = [
            (Some(Continue), Some(Continue), Continue),
            (Some(Kill), Some(Kill), Kill),
            (Some(Kill), Some(Continue), Pivot),
            (Some(Continue), Some(Kill), Pivot),
            (Some(Continue), Some(Pivot), Pivot),
            (Some(Pivot), Some(Pivot), Pivot),
            (Some(Kill), Some(Pivot), Pivot),
            (None, None, Continue),
            (None, Some(Kill), Pivot),
        ];
        for (first, second, expected) in cases {
            assert_eq!(
                resolve_disposition(first, second),
                expected,
                "votes {first:?} / {second:?}"
            );
        }
    }

    #[test]
    fn single_kill_vote_is_softened_to_pivot() {
        // Asymmetric on purpose: one KILL never yields KILL.
        assert_eq!(
            resolve_disposition(Some(Disposition::Kill), Some(Disposition::Continue)),
            Disposition::Pivot
        );
    }

    #[test]
    fn confidence_thresholds() {
        assert_eq!(confidence(0), Confidence::High);
        assert_eq!(confidence(49), Confidence::High);
        assert_eq!(confidence(50), Confidence::Medium);
        assert_eq!(confidence(119), Confidence::Medium);
        assert_eq!(confidence(120), Confidence::Low);
    }

    #[test]
    fn recommendations_are_unique_ordered_and_capped() {
        let merged = merge_recommendations(
            &strings(&["a", "b", "c", "d"]),
            &strings(&["b", "e", "a", "f", "g", "h"]),
        );
        assert_eq!(merged, strings(&["a", "b", "c", "d", "e", "f"]));

        let short = merge_recommendations(&strings(&["x", "x"]), &[]);
        assert_eq!(short, strings(&["x"]));
    }

    #[test]
    fn narrative_prefers_pass_one_and_falls_back_to_pass_two() {
        let mut first = pass(500, [100; 5], Some(Disposition::Continue));
        let mut second = pass(520, [110; 5], Some(Disposition::Continue));
        first.verdict = Some(String::new());
        second.verdict = Some("Second verdict".to_string());
        first.market_insight = Some("First insight".to_string());
        second.market_insight = Some("Second insight".to_string());
        second.strengths = Some(strings(&["s2"]));
        first.weaknesses = Some(Vec::new());
        second.weaknesses = Some(strings(&["w2"]));
        first.breakdown.market.comment = String::new();
        second.breakdown.market.comment = "Second market note".to_string();

        let result = blend(
            "Idea",
            &BlendWeights::default(),
            &ScoreCard::default(),
            &first,
            &second,
            "2026-01-01T00:00:00Z".to_string(),
        );

        assert_eq!(result.verdict, "Second verdict");
        assert_eq!(result.market_insight, "First insight");
        assert_eq!(result.strengths, strings(&["s2"]));
        // An explicit empty list from pass 1 is kept.
        assert!(result.weaknesses.is_empty());
        assert_eq!(result.breakdown.market.comment, "Second market note");
        assert_eq!(result.breakdown.team.comment, "Team note");
        assert_eq!(result.meta.score_diff, 20);
        assert_eq!(result.meta.confidence, Confidence::High);
        assert_eq!(result.meta.algorithm_score, 0);
        assert_eq!(
            result.meta.methodology,
            "Hybrid: 20% Algorithm + 40% AI Pass 1 + 40% AI Pass 2"
        );
    }
}
