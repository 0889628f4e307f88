mod ranking;
mod reliability;
mod rules;

pub use ranking::UsageResult;
pub use reliability::{compute_reliability, Reliability, ReliabilityTier};

use serde::{Deserialize, Serialize};

use super::domain::{Criterion, ParcelRecord, Usage};
use ranking::rank_usages;
use rules::score_record;

/// Stateless evaluator applying the score rule catalog to an assembled parcel record.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutabilityEngine;

impl MutabilityEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rejects records that cannot yield a meaningful ranking.
    pub fn check_preconditions(&self, record: &ParcelRecord) -> Result<(), EvaluationError> {
        match record.site.site_area_m2 {
            None => {
                return Err(EvaluationError::MissingMandatoryCriterion(
                    Criterion::SiteArea,
                ))
            }
            Some(area) if !area.is_finite() || area <= 0.0 => {
                return Err(EvaluationError::InvalidMeasure {
                    criterion: Criterion::SiteArea,
                    value: area,
                })
            }
            Some(_) => {}
        }

        for (criterion, value) in record.criteria() {
            if let Some(measure) = value.measure() {
                if !measure.is_finite() || measure < 0.0 {
                    return Err(EvaluationError::InvalidMeasure {
                        criterion,
                        value: measure,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn evaluate(&self, record: &ParcelRecord) -> Result<MutabilityOutcome, EvaluationError> {
        self.check_preconditions(record)?;

        let sheet = score_record(record);
        let results = rank_usages(&sheet);
        let breakdown = Usage::ALL
            .into_iter()
            .map(|usage| {
                let tally = sheet.tally(usage);
                UsageBreakdown {
                    usage,
                    advantages: tally.advantages,
                    constraints: tally.constraints,
                }
            })
            .collect();

        Ok(MutabilityOutcome {
            results,
            reliability: compute_reliability(record),
            breakdown,
            missing_criteria: sheet.missing,
        })
    }
}

/// Weighted evidence behind one use case's index, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageBreakdown {
    pub usage: Usage,
    pub advantages: f64,
    pub constraints: f64,
}

/// Ranked use cases, reliability and diagnostics for one parcel record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutabilityOutcome {
    /// Most favourable first.
    pub results: Vec<UsageResult>,
    pub reliability: Reliability,
    pub breakdown: Vec<UsageBreakdown>,
    pub missing_criteria: Vec<Criterion>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("mandatory criterion {0:?} is missing")]
    MissingMandatoryCriterion(Criterion),
    #[error("criterion {criterion:?} has an invalid measure ({value})")]
    InvalidMeasure { criterion: Criterion, value: f64 },
}
