use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::cache::{CacheError, EvaluationCache};
use super::config::{CacheFailurePolicy, EvaluationSettings};
use super::domain::{
    Coordinates, Criterion, EvaluationId, ManualAnswers, ParcelId, ParcelRecord, RequestOrigin,
    SiteData,
};
use super::engine::{EvaluationError, MutabilityEngine};
use super::repository::{EvaluationRecord, EvaluationRepository, RepositoryError};
use super::risks::{
    NaturalHazardAssessment, NaturalHazardCombiner, PollutionDetection, PollutionDetector,
};

/// Enriched site data plus questionnaire answers for one parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub parcel_id: ParcelId,
    #[serde(default)]
    pub location: Option<Coordinates>,
    #[serde(default)]
    pub municipality_code: Option<String>,
    #[serde(default)]
    pub site: SiteData,
    #[serde(default)]
    pub answers: ManualAnswers,
    #[serde(default)]
    pub origin: RequestOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheStatus {
    Hit,
    Miss,
    Unavailable,
}

/// Evaluation record plus what happened while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub record: EvaluationRecord,
    pub cache: CacheStatus,
    pub persisted: bool,
    pub natural_hazards: Option<NaturalHazardAssessment>,
    pub pollution: Option<PollutionDetection>,
    pub missing_criteria: Vec<Criterion>,
}

/// Service composing the cache, the risk combiners and the scoring engine.
pub struct MutabilityService<R> {
    repository: Arc<R>,
    cache: EvaluationCache<R>,
    engine: MutabilityEngine,
    hazards: NaturalHazardCombiner,
    pollution: PollutionDetector,
    cache_failure_policy: CacheFailurePolicy,
}

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

impl<R> MutabilityService<R>
where
    R: EvaluationRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        hazards: NaturalHazardCombiner,
        pollution: PollutionDetector,
        settings: &EvaluationSettings,
    ) -> Self {
        let cache = EvaluationCache::new(repository.clone(), settings.cache_settings());
        Self {
            repository,
            cache,
            engine: MutabilityEngine::new(),
            hazards,
            pollution,
            cache_failure_policy: settings.cache_failure_policy,
        }
    }

    /// Replay a cached evaluation when one matches, otherwise resolve risks and compute.
    pub async fn evaluate(
        &self,
        request: EvaluationRequest,
    ) -> Result<EvaluationReport, ServiceError> {
        let now = Utc::now();
        let EvaluationRequest {
            parcel_id,
            location,
            municipality_code,
            site,
            answers,
            origin,
        } = request;

        let mut parcel = ParcelRecord::new(parcel_id, site, answers);
        self.engine.check_preconditions(&parcel)?;

        let (cached, cache_status) = match self
            .cache
            .find_reusable_result(&parcel.parcel_id, &parcel.answers, now)
            .await
        {
            Ok(Some(source)) => (Some(source), CacheStatus::Hit),
            Ok(None) => (None, CacheStatus::Miss),
            Err(error) => (None, self.tolerate_cache_failure(error)?),
        };

        if let Some(source) = cached {
            let mut record = source.replay(next_evaluation_id(), now, origin);
            let persisted = self.persist(&mut record).await?;
            info!(
                parcel = %record.parcel_id().0,
                evaluation = %record.id.0,
                reused_from = %source.id.0,
                "evaluation replayed from cache"
            );
            let missing_criteria = record.parcel.missing_criteria();
            return Ok(EvaluationReport {
                record,
                cache: CacheStatus::Hit,
                persisted,
                natural_hazards: None,
                pollution: None,
                missing_criteria,
            });
        }

        let (natural_hazards, pollution) = match location {
            Some(location) => {
                tokio::join!(
                    self.resolve_hazards(&location, &parcel.site),
                    self.resolve_pollution(&location, municipality_code.as_deref(), &parcel.site),
                )
            }
            None => (None, None),
        };

        if let Some(assessment) = natural_hazards.as_ref().filter(|a| a.is_determined()) {
            parcel.site.natural_hazard = Some(assessment.level);
        }
        if let Some(detection) = pollution.as_ref().filter(|d| d.is_determined()) {
            parcel.site.pollution_detected = Some(detection.flagged);
        }

        let outcome = self.engine.evaluate(&parcel)?;
        let mut record = EvaluationRecord {
            id: next_evaluation_id(),
            parcel,
            results: outcome.results,
            reliability: outcome.reliability,
            computed_at: now,
            origin,
            reused_from: None,
        };

        let persisted = self.persist(&mut record).await?;

        info!(
            parcel = %record.parcel_id().0,
            evaluation = %record.id.0,
            reliability = record.reliability.score,
            persisted,
            "evaluation computed"
        );

        Ok(EvaluationReport {
            record,
            cache: cache_status,
            persisted,
            natural_hazards,
            pollution,
            missing_criteria: outcome.missing_criteria,
        })
    }

    /// Fetch a persisted evaluation.
    pub async fn get(&self, id: &EvaluationId) -> Result<EvaluationRecord, ServiceError> {
        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn tolerate_cache_failure(&self, error: CacheError) -> Result<CacheStatus, ServiceError> {
        match self.cache_failure_policy {
            CacheFailurePolicy::Abort => Err(ServiceError::Cache(error)),
            CacheFailurePolicy::ProceedUncached => {
                warn!(%error, "evaluation cache unavailable, proceeding uncached");
                Ok(CacheStatus::Unavailable)
            }
        }
    }

    /// Whether the record reached storage; a storage failure follows the cache policy.
    ///
    /// The id assigned by the store replaces the provisional one.
    async fn persist(&self, record: &mut EvaluationRecord) -> Result<bool, ServiceError> {
        match self.cache.store(record.clone()).await {
            Ok(id) => {
                record.id = id;
                Ok(true)
            }
            Err(error) => self.tolerate_cache_failure(error).map(|_| false),
        }
    }

    async fn resolve_hazards(
        &self,
        location: &Coordinates,
        site: &SiteData,
    ) -> Option<NaturalHazardAssessment> {
        if site.natural_hazard.is_some() {
            return None;
        }
        Some(self.hazards.assess(location).await)
    }

    async fn resolve_pollution(
        &self,
        location: &Coordinates,
        municipality_code: Option<&str>,
        site: &SiteData,
    ) -> Option<PollutionDetection> {
        if site.pollution_detected.is_some() {
            return None;
        }
        Some(self.pollution.detect(location, municipality_code).await)
    }
}

/// Error raised by the mutability service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
