use super::{DimensionRules, Rule};
use crate::types::input::Field;
use crate::types::scoring::Dimension;

/// Knowing the competition and naming a defensible edge both count.
pub fn rules() -> DimensionRules {
    DimensionRules {
        dimension: Dimension::Competitive,
        sources: &[Field::Competitors, Field::CompetitorWeakness],
        rules: vec![
            Rule::longer_than("competitive.knows_competitors", Field::Competitors, 30, 40),
            Rule::longer_than("competitive.weakness_detail", Field::CompetitorWeakness, 40, 40),
            Rule::pattern(
                "competitive.moat",
                r"moat|barrier|switching cost|network effect|patent|lock-in",
                50,
            ),
            Rule::pattern(
                "competitive.incumbent_weakness",
                r"slow|expensive|outdated|complex|poor ux",
                30,
            ),
            Rule::pattern(
                "competitive.open_field",
                r"no competitor|no direct|blue ocean",
                20,
            ),
        ],
    }
}
