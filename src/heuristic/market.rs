use super::{DimensionRules, Rule};
use crate::types::input::Field;
use crate::types::scoring::Dimension;

/// Rewards specificity, numbers and growth language about the market.
pub fn rules() -> DimensionRules {
    DimensionRules {
        dimension: Dimension::Market,
        sources: &[Field::MarketSize, Field::TargetAudience],
        rules: vec![
            Rule::pattern("market.scale", r"\$[0-9,]+[bmk]|billion|million", 60),
            Rule::pattern("market.growth", r"grow|cagr|yoy|increasing|expanding", 40),
            Rule::longer_than("market.audience_detail", Field::TargetAudience, 30, 30),
            Rule::longer_than("market.size_detail", Field::MarketSize, 15, 30),
            Rule::pattern("market.niche", r"niche|specific|segment", 20),
        ],
    }
}
