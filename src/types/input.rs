use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Founder-supplied answers. Every field is optional free text; absent
/// answers are empty strings and are never rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FounderInput {
    #[serde(alias = "idea_name")]
    pub idea_name: String,
    #[serde(alias = "idea_description")]
    pub idea_description: String,
    #[serde(alias = "problem_solving")]
    pub problem_solving: String,
    #[serde(alias = "target_audience")]
    pub target_audience: String,
    #[serde(alias = "unique_value")]
    pub unique_value: String,
    pub competitors: String,
    #[serde(alias = "competitor_weakness")]
    pub competitor_weakness: String,
    #[serde(alias = "market_size")]
    pub market_size: String,
    #[serde(alias = "revenue_model")]
    pub revenue_model: String,
    pub pricing: String,
    #[serde(alias = "customer_acquisition")]
    pub customer_acquisition: String,
    #[serde(alias = "team_size")]
    pub team_size: String,
    #[serde(alias = "team_skills")]
    pub team_skills: String,
    #[serde(alias = "founder_experience")]
    pub founder_experience: String,
    #[serde(alias = "mvp_timeline")]
    pub mvp_timeline: String,
    pub milestones: String,
    #[serde(alias = "funding_needed")]
    pub funding_needed: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    IdeaName,
    IdeaDescription,
    ProblemSolving,
    TargetAudience,
    UniqueValue,
    Competitors,
    CompetitorWeakness,
    MarketSize,
    RevenueModel,
    Pricing,
    CustomerAcquisition,
    TeamSize,
    TeamSkills,
    FounderExperience,
    MvpTimeline,
    Milestones,
    FundingNeeded,
}

impl Field {
    pub const ALL: [Field; 17] = [
        Field::IdeaName,
        Field::IdeaDescription,
        Field::ProblemSolving,
        Field::TargetAudience,
        Field::UniqueValue,
        Field::Competitors,
        Field::CompetitorWeakness,
        Field::MarketSize,
        Field::RevenueModel,
        Field::Pricing,
        Field::CustomerAcquisition,
        Field::TeamSize,
        Field::TeamSkills,
        Field::FounderExperience,
        Field::MvpTimeline,
        Field::Milestones,
        Field::FundingNeeded,
    ];

    /// Label used in the prompt's details block.
    pub fn detail_label(self) -> &'static str {
        match self {
            Field::IdeaName => "Name",
            Field::IdeaDescription => "Description",
            Field::ProblemSolving => "Problem",
            Field::TargetAudience => "Target Audience",
            Field::UniqueValue => "Unique Value",
            Field::Competitors => "Competitors",
            Field::CompetitorWeakness => "Competitor Weaknesses",
            Field::MarketSize => "Market Size",
            Field::RevenueModel => "Revenue Model",
            Field::Pricing => "Pricing",
            Field::CustomerAcquisition => "Customer Acquisition",
            Field::TeamSize => "Team Size",
            Field::TeamSkills => "Team Skills",
            Field::FounderExperience => "Founder Experience",
            Field::MvpTimeline => "MVP Timeline",
            Field::Milestones => "Key Milestones",
            Field::FundingNeeded => "Funding Needed",
        }
    }
}

impl FounderInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::IdeaName => &self.idea_name,
            Field::IdeaDescription => &self.idea_description,
            Field::ProblemSolving => &self.problem_solving,
            Field::TargetAudience => &self.target_audience,
            Field::UniqueValue => &self.unique_value,
            Field::Competitors => &self.competitors,
            Field::CompetitorWeakness => &self.competitor_weakness,
            Field::MarketSize => &self.market_size,
            Field::RevenueModel => &self.revenue_model,
            Field::Pricing => &self.pricing,
            Field::CustomerAcquisition => &self.customer_acquisition,
            Field::TeamSize => &self.team_size,
            Field::TeamSkills => &self.team_skills,
            Field::FounderExperience => &self.founder_experience,
            Field::MvpTimeline => &self.mvp_timeline,
            Field::Milestones => &self.milestones,
            Field::FundingNeeded => &self.funding_needed,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::IdeaName => &mut self.idea_name,
            Field::IdeaDescription => &mut self.idea_description,
            Field::ProblemSolving => &mut self.problem_solving,
            Field::TargetAudience => &mut self.target_audience,
            Field::UniqueValue => &mut self.unique_value,
            Field::Competitors => &mut self.competitors,
            Field::CompetitorWeakness => &mut self.competitor_weakness,
            Field::MarketSize => &mut self.market_size,
            Field::RevenueModel => &mut self.revenue_model,
            Field::Pricing => &mut self.pricing,
            Field::CustomerAcquisition => &mut self.customer_acquisition,
            Field::TeamSize => &mut self.team_size,
            Field::TeamSkills => &mut self.team_skills,
            Field::FounderExperience => &mut self.founder_experience,
            Field::MvpTimeline => &mut self.mvp_timeline,
            Field::Milestones => &mut self.milestones,
            Field::FundingNeeded => &mut self.funding_needed,
        };
        *slot = value.into();
    }

    /// Lower-cased texts of `fields`, joined by a single space.
    pub fn combined_lowercase(&self, fields: &[Field]) -> String {
        fields
            .iter()
            .map(|field| self.get(*field))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// The "STARTUP DETAILS" block embedded in every evaluation prompt.
    pub fn details(&self) -> String {
        let mut out = String::from("STARTUP DETAILS:");
        for field in Field::ALL {
            out.push_str(&format!("\n- {}: {}", field.detail_label(), self.get(field)));
        }
        out
    }
}

pub fn load_input(path: &Path) -> Result<FounderInput> {
    if !path.exists() {
        return Err(AppError::InputNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        toml::from_str(&content)
            .map_err(|e| AppError::InputParse(format!("{}: {}", path.display(), e)))
    } else {
        serde_json::from_str(&content)
            .map_err(|e| AppError::InputParse(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn json_input_uses_camel_case_and_defaults_missing_fields() {
        let input: FounderInput =
            serde_json::from_str(r#"{"ideaName":"NeuralMatch","marketSize":"$2B TAM"}"#)
                .expect("input should parse");
        assert_eq!(input.idea_name, "NeuralMatch");
        assert_eq!(input.market_size, "$2B TAM");
        assert!(input.team_size.is_empty());
    }

    #[test]
    fn toml_input_accepts_snake_case_aliases() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("idea.toml");
        fs::write(
            &path,
            r#"
idea_name = "Ledgerly"
founder_experience = "10 years in accounting software"
"#,
        )
        .expect("input should write");

        let input = load_input(&path).expect("toml input should load");
        assert_eq!(input.idea_name, "Ledgerly");
        assert_eq!(input.founder_experience, "10 years in accounting software");
    }

    #[test]
    fn load_input_reports_missing_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let result = load_input(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(AppError::InputNotFound(_))));
    }

    #[test]
    fn details_lists_every_field_in_order() {
        let mut input = FounderInput::default();
        input.set(Field::IdeaName, "Acme");
        input.set(Field::FundingNeeded, "$500K seed");

        let details = input.details();
        assert!(details.starts_with("STARTUP DETAILS:\n- Name: Acme"));
        assert!(details.ends_with("- Funding Needed: $500K seed"));
        assert_eq!(details.lines().count(), 18);
    }

    #[test]
    fn combined_text_is_lowercased_and_space_joined() {
        let mut input = FounderInput::default();
        input.set(Field::MarketSize, "$2B");
        input.set(Field::TargetAudience, "SMB Owners");
        assert_eq!(
            input.combined_lowercase(&[Field::MarketSize, Field::TargetAudience]),
            "$2b smb owners"
        );
    }
}
