use super::{DimensionRules, Rule};
use crate::types::input::Field;
use crate::types::scoring::Dimension;

/// Solo-founder language carries a negative weight; the dimension floor of
/// zero still applies after accumulation.
pub fn rules() -> DimensionRules {
    DimensionRules {
        dimension: Dimension::Team,
        sources: &[Field::TeamSize, Field::TeamSkills, Field::FounderExperience],
        rules: vec![
            Rule::pattern("team.cofounders", r"co-founder|cofounder|2\+|3\+|partner", 40),
            Rule::pattern("team.technical", r"engineer|developer|technical|cto", 35),
            Rule::pattern(
                "team.startup_track_record",
                r"startup|founded|exit|yc|techstars|venture",
                45,
            ),
            Rule::pattern(
                "team.domain_experience",
                r"industry|domain|expert|years|experience",
                30,
            ),
            Rule::longer_than(
                "team.experience_detail",
                Field::FounderExperience,
                40,
                25,
            ),
            Rule::pattern("team.solo", r"solo|alone|just me|1 person", -30),
        ],
    }
}
