use super::{DimensionRules, Rule};
use crate::types::input::Field;
use crate::types::scoring::Dimension;

pub fn rules() -> DimensionRules {
    DimensionRules {
        dimension: Dimension::ProblemFit,
        sources: &[Field::ProblemSolving, Field::UniqueValue, Field::IdeaDescription],
        rules: vec![
            Rule::longer_than("problem_fit.problem_detail", Field::ProblemSolving, 50, 40),
            Rule::longer_than("problem_fit.value_detail", Field::UniqueValue, 40, 40),
            Rule::longer_than("problem_fit.description_detail", Field::IdeaDescription, 60, 30),
            Rule::pattern(
                "problem_fit.pain",
                r"pain|frustrat|expensive|slow|broken|inefficient|manual",
                30,
            ),
            Rule::pattern(
                "problem_fit.novelty",
                r"unique|first|only|patent|proprietary|novel",
                30,
            ),
            Rule::pattern("problem_fit.tech", r"data|ai|automat|platform", 15),
        ],
    }
}
