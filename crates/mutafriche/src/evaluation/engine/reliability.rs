use serde::{Deserialize, Serialize};

use super::super::catalog::total_weight;
use super::super::domain::{Criterion, ParcelRecord};

/// Confidence tier derived from the reliability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityTier {
    VeryReliable,
    Reliable,
    ModeratelyReliable,
    Low,
    VeryLow,
}

impl ReliabilityTier {
    /// Highest lower bound the score reaches wins.
    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            ReliabilityTier::VeryReliable
        } else if score >= 7.0 {
            ReliabilityTier::Reliable
        } else if score >= 5.0 {
            ReliabilityTier::ModeratelyReliable
        } else if score >= 3.0 {
            ReliabilityTier::Low
        } else {
            ReliabilityTier::VeryLow
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            ReliabilityTier::VeryReliable => "Very reliable",
            ReliabilityTier::Reliable => "Reliable",
            ReliabilityTier::ModeratelyReliable => "Moderately reliable",
            ReliabilityTier::Low => "Low reliability",
            ReliabilityTier::VeryLow => "Very low reliability",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ReliabilityTier::VeryReliable => {
                "Almost every criterion is documented; the ranking can be relied upon."
            }
            ReliabilityTier::Reliable => {
                "Most criteria are documented; the ranking gives a solid first orientation."
            }
            ReliabilityTier::ModeratelyReliable => {
                "Several criteria are missing; answer the remaining questions to firm up the ranking."
            }
            ReliabilityTier::Low => {
                "Many criteria are missing; the ranking should be read as a rough indication."
            }
            ReliabilityTier::VeryLow => {
                "Too few criteria are documented to draw conclusions from the ranking."
            }
        }
    }
}

/// Share, by weight, of catalog criteria that were actually answered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reliability {
    pub score: f64,
    pub tier: ReliabilityTier,
    pub answered_criteria: usize,
    pub total_criteria: usize,
}

/// Scores confidence on a 0-10 scale, rounded to the nearest half point.
pub fn compute_reliability(record: &ParcelRecord) -> Reliability {
    let values = record.criteria();
    let answered: Vec<Criterion> = Criterion::ALL
        .into_iter()
        .filter(|criterion| {
            values
                .get(criterion)
                .map(|value| value.is_answered())
                .unwrap_or(false)
        })
        .collect();

    let answered_weight: f64 = answered.iter().map(|criterion| criterion.weight()).sum();
    let raw = answered_weight / total_weight() * 10.0;
    let score = (raw * 2.0).round() / 2.0;

    Reliability {
        score,
        tier: ReliabilityTier::from_score(score),
        answered_criteria: answered.len(),
        total_criteria: Criterion::ALL.len(),
    }
}
