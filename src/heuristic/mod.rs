//! Deterministic, formula-based pre-score.
//!
//! Each dimension owns a table of `(predicate, weight)` rules evaluated over
//! the lower-cased concatenation of its source fields. Matching weights are
//! summed and the sum is clamped once to `0..=DIMENSION_MAX`.

pub mod competitive;
pub mod market;
pub mod problem_fit;
pub mod revenue;
pub mod team;

use crate::types::input::{Field, FounderInput};
use crate::types::report::{DimensionSignals, HeuristicReport};
use crate::types::scoring::{Dimension, Score, ScoreCard, DIMENSION_MAX};
use chrono::Utc;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

#[derive(Debug)]
pub enum Predicate {
    /// Pattern tested against the dimension's combined lower-cased text.
    Matches(Regex),
    /// Length of one raw field, in UTF-16 code units, strictly above the bound.
    LongerThan(Field, usize),
}

#[derive(Debug)]
pub struct Rule {
    pub id: &'static str,
    pub predicate: Predicate,
    pub weight: i32,
}

impl Rule {
    pub fn pattern(id: &'static str, pattern: &str, weight: i32) -> Self {
        let regex = Regex::new(pattern).expect("heuristic pattern should compile");
        Self {
            id,
            predicate: Predicate::Matches(regex),
            weight,
        }
    }

    pub fn longer_than(id: &'static str, field: Field, units: usize, weight: i32) -> Self {
        Self {
            id,
            predicate: Predicate::LongerThan(field, units),
            weight,
        }
    }

    fn is_match(&self, input: &FounderInput, text: &str) -> bool {
        match &self.predicate {
            Predicate::Matches(regex) => regex.is_match(text),
            Predicate::LongerThan(field, units) => {
                input.get(*field).encode_utf16().count() > *units
            }
        }
    }
}

#[derive(Debug)]
pub struct DimensionRules {
    pub dimension: Dimension,
    pub sources: &'static [Field],
    pub rules: Vec<Rule>,
}

impl DimensionRules {
    pub fn matched<'a>(&'a self, input: &FounderInput) -> Vec<&'a Rule> {
        let text = input.combined_lowercase(self.sources);
        self.rules
            .iter()
            .filter(|rule| rule.is_match(input, &text))
            .collect()
    }

    pub fn evaluate(&self, input: &FounderInput) -> Score {
        let raw: i32 = self.matched(input).iter().map(|rule| rule.weight).sum();
        raw.clamp(0, DIMENSION_MAX as i32) as Score
    }
}

static RULES: LazyLock<[DimensionRules; 5]> = LazyLock::new(|| {
    [
        market::rules(),
        problem_fit::rules(),
        competitive::rules(),
        revenue::rules(),
        team::rules(),
    ]
});

pub fn rules() -> &'static [DimensionRules] {
    RULES.as_slice()
}

pub fn rules_for(dimension: Dimension) -> &'static DimensionRules {
    rules()
        .iter()
        .find(|table| table.dimension == dimension)
        .unwrap_or(&RULES[0])
}

pub fn score(input: &FounderInput) -> ScoreCard {
    let mut card = ScoreCard::default();
    for table in rules() {
        let value = table.evaluate(input);
        debug!(
            dimension = table.dimension.label(),
            score = value,
            "heuristic dimension scored"
        );
        card.set(table.dimension, value);
    }
    card
}

/// Ids of every rule that fired, grouped by dimension.
pub fn signals(input: &FounderInput) -> Vec<(Dimension, Vec<&'static str>)> {
    rules()
        .iter()
        .map(|table| {
            let ids = table.matched(input).iter().map(|rule| rule.id).collect();
            (table.dimension, ids)
        })
        .collect()
}

pub fn report(input: &FounderInput) -> HeuristicReport {
    let card = score(input);
    HeuristicReport {
        idea_name: input.idea_name.clone(),
        score: card.total(),
        breakdown: card,
        signals: signals(input)
            .into_iter()
            .map(|(dimension, rules)| DimensionSignals { dimension, rules })
            .collect(),
        generated_at: Utc::now().to_rfc3339(),
    }
}
