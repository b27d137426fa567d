use super::{DimensionRules, Rule};
use crate::types::input::Field;
use crate::types::scoring::Dimension;

pub fn rules() -> DimensionRules {
    DimensionRules {
        dimension: Dimension::Revenue,
        sources: &[Field::RevenueModel, Field::Pricing, Field::CustomerAcquisition],
        rules: vec![
            Rule::pattern("revenue.recurring", r"saas|subscription|recurring|mrr|arr", 50),
            Rule::pattern("revenue.pricing", r"\$[0-9]+|free tier|freemium|trial", 40),
            Rule::longer_than(
                "revenue.acquisition_detail",
                Field::CustomerAcquisition,
                40,
                35,
            ),
            Rule::pattern(
                "revenue.channels",
                r"content|seo|referral|viral|partnership|outbound",
                30,
            ),
            Rule::pattern("revenue.enterprise", r"enterprise|b2b", 20),
            Rule::pattern(
                "revenue.marketplace",
                r"marketplace|transaction fee|commission",
                25,
            ),
        ],
    }
}
