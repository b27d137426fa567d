use crate::types::input::FounderInput;
use crate::types::scoring::ScoreCard;

pub const MARKET_FALLBACK: &str = "No additional market data found.";

const RESPONSE_SCHEMA: &str = r#"{
  "score": <number 0-1000>,
  "breakdown": {
    "market": { "score": <0-200>, "comment": "<1 sentence>" },
    "problemFit": { "score": <0-200>, "comment": "<1 sentence>" },
    "competitive": { "score": <0-200>, "comment": "<1 sentence>" },
    "revenue": { "score": <0-200>, "comment": "<1 sentence>" },
    "team": { "score": <0-200>, "comment": "<1 sentence>" }
  },
  "verdict": "<2-3 sentence overall verdict, reference the market data found>",
  "strengths": ["<strength 1>", "<strength 2>", "<strength 3>"],
  "weaknesses": ["<weakness 1>", "<weakness 2>", "<weakness 3>"],
  "recommendations": ["<action 1>", "<action 2>", "<action 3>", "<action 4>"],
  "marketInsight": "<1-2 sentences about what the real market data reveals>",
  "killOrContinue": "<KILL or CONTINUE or PIVOT>"
}"#;

pub fn search_query(input: &FounderInput) -> String {
    format!(
        "{} {} market size competitors 2025",
        input.idea_name, input.target_audience
    )
}

pub fn research_prompt(input: &FounderInput) -> String {
    format!(
        "Search the web for real market data about this startup space and summarize key findings \
         in 3-5 bullet points. Query context: \"{query}\". Startup: {name} - {description}. \
         Respond with ONLY a plain text summary, no JSON.",
        query = search_query(input),
        name = input.idea_name,
        description = input.idea_description,
    )
}

pub fn heuristic_line(card: &ScoreCard) -> String {
    format!(
        "Market: {}/200 | Problem Fit: {}/200 | Competitive: {}/200 | Revenue: {}/200 | Team: {}/200 | Total: {}/1000",
        card.market,
        card.problem_fit,
        card.competitive,
        card.revenue,
        card.team,
        card.total()
    )
}

/// Both passes share this template; only `pass` differs.
pub fn evaluation_prompt(
    pass: u8,
    input: &FounderInput,
    market_intel: &str,
    card: &ScoreCard,
) -> String {
    format!(
        "You are a ruthless but fair startup evaluator (Pass {pass}/2). Analyze this startup idea \
         using BOTH the founder's input AND the real market research below. Respond ONLY with valid \
         JSON (no markdown, no backticks).\n\n\
         {details}\n\n\
         REAL MARKET INTELLIGENCE (from web search):\n\
         {market_intel}\n\n\
         ALGORITHMIC PRE-SCORE (formula-based, for reference):\n\
         {pre_score}\n\n\
         Use the algorithmic score as a baseline but adjust based on your deeper qualitative \
         analysis and the market research. Be brutally honest. Score each dimension 0-200.\n\n\
         Respond with this exact JSON structure:\n\
         {RESPONSE_SCHEMA}",
        details = input.details(),
        pre_score = heuristic_line(card),
    )
}
