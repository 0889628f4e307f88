use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::sources::{within, CavitySource, CavitySurvey, ClayShrinkSwellSource, SourceError};
use crate::evaluation::config::EvaluationSettings;
use crate::evaluation::domain::{Coordinates, HazardLevel};

/// Distance thresholds turning the nearest cavity into a hazard level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardThresholds {
    pub strong_within_m: f64,
    pub medium_within_m: f64,
}

impl Default for HazardThresholds {
    fn default() -> Self {
        Self {
            strong_within_m: 500.0,
            medium_within_m: 1000.0,
        }
    }
}

impl HazardLevel {
    /// Case-insensitive reading of a clay shrink-swell exposure label.
    pub fn from_clay_exposure(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("fort") || label.contains("strong") {
            HazardLevel::Strong
        } else if label.contains("moyen") || label.contains("medium") {
            HazardLevel::Medium
        } else if label.contains("faible") || label.contains("low") {
            HazardLevel::Low
        } else {
            HazardLevel::None
        }
    }

    pub fn from_cavities(survey: &CavitySurvey, thresholds: &HazardThresholds) -> Self {
        if survey.cavities_found == 0 {
            return HazardLevel::None;
        }
        match survey.nearest_distance_m {
            None => HazardLevel::None,
            Some(distance) if distance <= thresholds.strong_within_m => HazardLevel::Strong,
            Some(distance) if distance <= thresholds.medium_within_m => HazardLevel::Medium,
            Some(_) => HazardLevel::Low,
        }
    }
}

/// Cap-and-downgrade combination of two hazard levels.
///
/// A strong signal only stays strong when the other one is at least medium; otherwise it is
/// downgraded to medium. Below strong, the higher level wins.
pub fn combine(a: HazardLevel, b: HazardLevel) -> HazardLevel {
    let high = a.max(b);
    let low = a.min(b);
    match high {
        HazardLevel::Strong if low >= HazardLevel::Medium => HazardLevel::Strong,
        HazardLevel::Strong | HazardLevel::Medium => HazardLevel::Medium,
        HazardLevel::Low => HazardLevel::Low,
        HazardLevel::None => HazardLevel::None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HazardSource {
    ClayShrinkSwell,
    UndergroundCavities,
}

/// Combined natural hazard level plus per-source bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaturalHazardAssessment {
    pub level: HazardLevel,
    pub sources_used: Vec<HazardSource>,
    pub sources_failed: Vec<HazardSource>,
}

impl NaturalHazardAssessment {
    /// Failed sources count as `None` in the combination.
    pub fn from_outcomes(
        clay: Result<Option<String>, SourceError>,
        cavities: Result<CavitySurvey, SourceError>,
        thresholds: &HazardThresholds,
    ) -> Self {
        let mut sources_used = Vec::new();
        let mut sources_failed = Vec::new();

        let clay_level = match clay {
            Ok(label) => {
                sources_used.push(HazardSource::ClayShrinkSwell);
                label
                    .as_deref()
                    .map(HazardLevel::from_clay_exposure)
                    .unwrap_or(HazardLevel::None)
            }
            Err(error) => {
                warn!(source = "clay_shrink_swell", %error, "hazard source failed");
                sources_failed.push(HazardSource::ClayShrinkSwell);
                HazardLevel::None
            }
        };

        let cavity_level = match cavities {
            Ok(survey) => {
                sources_used.push(HazardSource::UndergroundCavities);
                HazardLevel::from_cavities(&survey, thresholds)
            }
            Err(error) => {
                warn!(source = "underground_cavities", %error, "hazard source failed");
                sources_failed.push(HazardSource::UndergroundCavities);
                HazardLevel::None
            }
        };

        Self {
            level: combine(clay_level, cavity_level),
            sources_used,
            sources_failed,
        }
    }

    /// At least one source answered.
    pub fn is_determined(&self) -> bool {
        !self.sources_used.is_empty()
    }
}

/// Queries both hazard registries concurrently and combines their levels.
#[derive(Clone)]
pub struct NaturalHazardCombiner {
    clay: Arc<dyn ClayShrinkSwellSource>,
    cavities: Arc<dyn CavitySource>,
    thresholds: HazardThresholds,
    timeout: Duration,
}

impl NaturalHazardCombiner {
    pub fn new(
        clay: Arc<dyn ClayShrinkSwellSource>,
        cavities: Arc<dyn CavitySource>,
        settings: &EvaluationSettings,
    ) -> Self {
        Self {
            clay,
            cavities,
            thresholds: settings.hazard_thresholds(),
            timeout: settings.source_timeout(),
        }
    }

    pub async fn assess(&self, location: &Coordinates) -> NaturalHazardAssessment {
        let (clay, cavities) = tokio::join!(
            within(self.timeout, self.clay.exposure(location)),
            within(self.timeout, self.cavities.survey(location)),
        );

        let assessment = NaturalHazardAssessment::from_outcomes(clay, cavities, &self.thresholds);
        debug!(
            level = ?assessment.level,
            failed = assessment.sources_failed.len(),
            "natural hazards assessed"
        );
        assessment
    }
}
