use crate::types::report::{BlendedResult, HeuristicReport};

pub fn to_json(result: &BlendedResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

pub fn heuristic_to_json(report: &HeuristicReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend;
    use crate::llm::parse_evaluation;
    use crate::types::config::BlendWeights;
    use crate::types::scoring::ScoreCard;
    use serde_json::Value;

    #[test]
    fn json_report_uses_camel_case_keys() {
        let pass = parse_evaluation(
            r#"{"score": 640, "breakdown": {"problemFit": {"score": 150, "comment": "sharp"}},
                "killOrContinue": "CONTINUE"}"#,
        )
        .expect("pass should parse");
        let result = blend::blend(
            "Ledgerly",
            &BlendWeights::default(),
            &ScoreCard::default(),
            &pass,
            &pass,
            "2026-01-01T00:00:00+00:00".to_string(),
        );

        let rendered = to_json(&result).expect("json should serialize");
        let value: Value = serde_json::from_str(&rendered).expect("json should parse back");
        assert_eq!(value["ideaName"], "Ledgerly");
        assert_eq!(value["breakdown"]["problemFit"]["score"], 120);
        assert_eq!(value["killOrContinue"], "CONTINUE");
        assert_eq!(value["meta"]["aiPass1Score"], 640);
        assert_eq!(value["meta"]["confidence"], "HIGH");
        assert_eq!(value["meta"]["evaluatedAt"], "2026-01-01T00:00:00+00:00");
    }

    #[test]
    fn heuristic_json_carries_breakdown_and_signals() {
        let report = crate::heuristic::report(&crate::types::input::FounderInput {
            pricing: "$29/mo".to_string(),
            ..Default::default()
        });
        let rendered = heuristic_to_json(&report).expect("json should serialize");
        let value: Value = serde_json::from_str(&rendered).expect("json should parse back");
        assert_eq!(value["breakdown"]["revenue"], 40);
        assert_eq!(value["score"], 40);
        assert_eq!(value["signals"][3]["dimension"], "revenue");
    }
}
