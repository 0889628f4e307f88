//! Caller-facing JSON shape. Field names are consumed by the existing UI and must stay stable.

use serde::Serialize;

use super::domain::{Criterion, EvaluationId, Usage};
use super::engine::{Reliability, UsageResult};
use super::repository::EvaluationRecord;
use super::risks::{NaturalHazardAssessment, PollutionDetection};
use super::service::{CacheStatus, EvaluationReport};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReliabilityView {
    pub note: f64,
    pub text: &'static str,
    pub description: &'static str,
    pub criteres_renseignes: usize,
    pub criteres_total: usize,
}

impl From<&Reliability> for ReliabilityView {
    fn from(reliability: &Reliability) -> Self {
        Self {
            note: reliability.score,
            text: reliability.tier.text(),
            description: reliability.tier.description(),
            criteres_renseignes: reliability.answered_criteria,
            criteres_total: reliability.total_criteria,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResultView {
    pub usage: Usage,
    pub indice_mutabilite: f64,
    pub rang: u8,
}

impl From<&UsageResult> for UsageResultView {
    fn from(result: &UsageResult) -> Self {
        Self {
            usage: result.usage,
            indice_mutabilite: result.index,
            rang: result.rank,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationView {
    pub evaluation_id: EvaluationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reused_from: Option<EvaluationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStatus>,
    pub fiabilite: ReliabilityView,
    pub resultats: Vec<UsageResultView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pollution: Option<PollutionDetection>,
    #[serde(rename = "risquesNaturels", skip_serializing_if = "Option::is_none")]
    pub natural_hazards: Option<NaturalHazardAssessment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub criteres_manquants: Vec<Criterion>,
}

impl EvaluationRecord {
    pub fn view(&self) -> EvaluationView {
        EvaluationView {
            evaluation_id: self.id.clone(),
            reused_from: self.reused_from.clone(),
            cache: None,
            fiabilite: ReliabilityView::from(&self.reliability),
            resultats: self.results.iter().map(UsageResultView::from).collect(),
            pollution: None,
            natural_hazards: None,
            criteres_manquants: self.parcel.missing_criteria(),
        }
    }
}

impl EvaluationReport {
    pub fn view(&self) -> EvaluationView {
        EvaluationView {
            cache: Some(self.cache),
            pollution: self.pollution.clone(),
            natural_hazards: self.natural_hazards.clone(),
            criteres_manquants: self.missing_criteria.clone(),
            ..self.record.view()
        }
    }
}
