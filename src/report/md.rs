use crate::types::report::{BlendedResult, HeuristicReport};
use crate::types::scoring::{Dimension, DIMENSION_MAX};

fn title(idea_name: &str) -> &str {
    if idea_name.trim().is_empty() {
        "Untitled idea"
    } else {
        idea_name
    }
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn push_list(output: &mut String, heading: &str, items: &[String]) {
    output.push_str(&format!("## {heading}\n\n"));
    if items.is_empty() {
        output.push_str("- none\n\n");
        return;
    }
    for item in items {
        output.push_str(&format!("- {item}\n"));
    }
    output.push('\n');
}

pub fn to_markdown(result: &BlendedResult) -> String {
    let tier = result.tier();
    let mut output = String::new();
    output.push_str(&format!(
        "# {}: {}/1000\n\n",
        title(&result.idea_name),
        result.score
    ));
    output.push_str(&format!("**{}** - {}\n\n", tier.label, tier.verdict));
    output.push_str(&format!(
        "Disposition: {} | Confidence: {} (score diff {})\n\n",
        result.kill_or_continue,
        result.meta.confidence.as_str(),
        result.meta.score_diff
    ));

    output.push_str("## Breakdown\n\n");
    output.push_str("| Dimension | Score | Comment |\n|---|---|---|\n");
    for dimension in Dimension::ALL {
        let entry = result.breakdown.get(dimension);
        output.push_str(&format!(
            "| {} | {}/{DIMENSION_MAX} | {} |\n",
            dimension.label(),
            entry.score,
            cell(&entry.comment)
        ));
    }
    output.push('\n');

    if !result.verdict.is_empty() {
        output.push_str(&format!("## Verdict\n\n{}\n\n", result.verdict));
    }
    push_list(&mut output, "Strengths", &result.strengths);
    push_list(&mut output, "Weaknesses", &result.weaknesses);
    if !result.market_insight.is_empty() {
        output.push_str(&format!("## Market Insight\n\n{}\n\n", result.market_insight));
    }

    output.push_str("## Recommendations\n\n");
    if result.recommendations.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for (index, recommendation) in result.recommendations.iter().enumerate() {
            output.push_str(&format!("{}. {recommendation}\n", index + 1));
        }
        output.push('\n');
    }

    output.push_str("## Methodology\n\n");
    output.push_str(&format!(
        "{}\n\n- algorithm: {}/1000\n- ai pass 1: {}/1000\n- ai pass 2: {}/1000\n- evaluated at: {}\n",
        result.meta.methodology,
        result.meta.algorithm_score,
        result.meta.ai_pass1_score,
        result.meta.ai_pass2_score,
        result.meta.evaluated_at
    ));

    output
}

pub fn heuristic_to_markdown(report: &HeuristicReport) -> String {
    let tier = report.tier();
    let mut output = String::new();
    output.push_str(&format!(
        "# {}: heuristic pre-score {}/1000\n\n",
        title(&report.idea_name),
        report.score
    ));
    output.push_str(&format!("**{}** - {}\n\n", tier.label, tier.verdict));
    output.push_str("## Dimension Scores\n\n");
    output.push_str("| Dimension | Score | Signals |\n|---|---|---|\n");
    for dimension in Dimension::ALL {
        let fired = report
            .signals
            .iter()
            .find(|entry| entry.dimension == dimension)
            .map(|entry| entry.rules.join(", "))
            .filter(|joined| !joined.is_empty())
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "| {} | {}/{DIMENSION_MAX} | {} |\n",
            dimension.label(),
            report.breakdown.get(dimension),
            fired
        ));
    }
    output
}
