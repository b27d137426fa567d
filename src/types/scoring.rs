use serde::{Deserialize, Deserializer, Serialize};

pub type Score = u32;

pub const DIMENSION_MAX: Score = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Market,
    ProblemFit,
    Competitive,
    Revenue,
    Team,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Market,
        Dimension::ProblemFit,
        Dimension::Competitive,
        Dimension::Revenue,
        Dimension::Team,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Market => "Market",
            Dimension::ProblemFit => "Problem Fit",
            Dimension::Competitive => "Competitive",
            Dimension::Revenue => "Revenue",
            Dimension::Team => "Team",
        }
    }
}

/// Per-dimension scores from the heuristic scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub market: Score,
    pub problem_fit: Score,
    pub competitive: Score,
    pub revenue: Score,
    pub team: Score,
}

impl ScoreCard {
    pub fn get(&self, dimension: Dimension) -> Score {
        match dimension {
            Dimension::Market => self.market,
            Dimension::ProblemFit => self.problem_fit,
            Dimension::Competitive => self.competitive,
            Dimension::Revenue => self.revenue,
            Dimension::Team => self.team,
        }
    }

    pub fn set(&mut self, dimension: Dimension, score: Score) {
        let slot = match dimension {
            Dimension::Market => &mut self.market,
            Dimension::ProblemFit => &mut self.problem_fit,
            Dimension::Competitive => &mut self.competitive,
            Dimension::Revenue => &mut self.revenue,
            Dimension::Team => &mut self.team,
        };
        *slot = score;
    }

    pub fn total(&self) -> Score {
        Dimension::ALL.iter().map(|dimension| self.get(*dimension)).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionScore {
    #[serde(deserialize_with = "dimension_score")]
    pub score: Score,
    #[serde(deserialize_with = "null_as_default")]
    pub comment: String,
}

/// Five dimension scores with comments. A dimension missing from a pass
/// response deserializes as score 0 with an empty comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Breakdown {
    #[serde(deserialize_with = "null_as_default")]
    pub market: DimensionScore,
    #[serde(deserialize_with = "null_as_default")]
    pub problem_fit: DimensionScore,
    #[serde(deserialize_with = "null_as_default")]
    pub competitive: DimensionScore,
    #[serde(deserialize_with = "null_as_default")]
    pub revenue: DimensionScore,
    #[serde(deserialize_with = "null_as_default")]
    pub team: DimensionScore,
}

impl Breakdown {
    pub fn get(&self, dimension: Dimension) -> &DimensionScore {
        match dimension {
            Dimension::Market => &self.market,
            Dimension::ProblemFit => &self.problem_fit,
            Dimension::Competitive => &self.competitive,
            Dimension::Revenue => &self.revenue,
            Dimension::Team => &self.team,
        }
    }

    pub fn get_mut(&mut self, dimension: Dimension) -> &mut DimensionScore {
        match dimension {
            Dimension::Market => &mut self.market,
            Dimension::ProblemFit => &mut self.problem_fit,
            Dimension::Competitive => &mut self.competitive,
            Dimension::Revenue => &mut self.revenue,
            Dimension::Team => &mut self.team,
        }
    }

    pub fn total(&self) -> Score {
        Dimension::ALL
            .iter()
            .map(|dimension| self.get(*dimension).score)
            .sum()
    }
}

/// Model-supplied numbers may be fractional, negative, null or above the cap.
fn dimension_score<'de, D>(deserializer: D) -> Result<Score, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(clamp_rounded(raw, DIMENSION_MAX))
}

/// An explicit `null` reads the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn total_score<'de, D>(deserializer: D) -> Result<Score, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(clamp_rounded(raw, Score::MAX))
}

fn clamp_rounded(raw: Option<f64>, max: Score) -> Score {
    match raw {
        Some(value) if value.is_finite() => value.round().clamp(0.0, f64::from(max)) as Score,
        _ => 0,
    }
}
