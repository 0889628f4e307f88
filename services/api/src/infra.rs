use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use mutafriche::evaluation::risks::{
    CavitySource, CavitySurvey, ClayShrinkSwellSource, ContaminatedSiteRegistry,
    IndustrialInstallationRegistry, NaturalHazardCombiner, PollutionDetector,
    SoilInformationZoneRegistry, SourceError,
};
use mutafriche::evaluation::{
    Coordinates, EvaluationId, EvaluationRecord, EvaluationRepository, EvaluationSettings,
    MutabilityService, ParcelId, RepositoryError,
};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local evaluation store for single-node development; records are kept in
/// insertion order and anything older than the retention window is dropped on save.
#[derive(Clone)]
pub(crate) struct InMemoryEvaluationRepository {
    records: Arc<Mutex<Vec<EvaluationRecord>>>,
    retention: Duration,
}

impl InMemoryEvaluationRepository {
    pub(crate) fn new(retention: Duration) -> Self {
        Self {
            records: Arc::default(),
            retention,
        }
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, Vec<EvaluationRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

#[async_trait]
impl EvaluationRepository for InMemoryEvaluationRepository {
    async fn save(&self, record: EvaluationRecord) -> Result<EvaluationId, RepositoryError> {
        let id = record.id.clone();
        let cutoff = Utc::now() - self.retention;
        let mut records = self.guard()?;
        records.retain(|stored| stored.computed_at >= cutoff);
        records.push(record);
        Ok(id)
    }

    async fn find_by_id(
        &self,
        id: &EvaluationId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Ok(self.guard()?.iter().find(|record| &record.id == id).cloned())
    }

    async fn find_recent_by_parcel(
        &self,
        parcel_id: &ParcelId,
        since: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        let guard = self.guard()?;
        let mut recent: Vec<EvaluationRecord> = guard
            .iter()
            .filter(|record| record.parcel_id() == parcel_id && record.computed_at >= since)
            .cloned()
            .collect();
        recent.sort_by(|left, right| right.computed_at.cmp(&left.computed_at));
        recent.truncate(limit);
        Ok(recent)
    }
}

/// Stand-in for the external registries when no client is wired in.
///
/// Every call fails, so hazard and pollution criteria stay unanswered unless the request
/// supplies them.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct UnconfiguredRegistry;

impl UnconfiguredRegistry {
    fn unavailable<T>(registry: &str) -> Result<T, SourceError> {
        Err(SourceError::Unavailable(format!(
            "{registry} registry is not configured"
        )))
    }
}

#[async_trait]
impl ClayShrinkSwellSource for UnconfiguredRegistry {
    async fn exposure(&self, _location: &Coordinates) -> Result<Option<String>, SourceError> {
        Self::unavailable("clay shrink-swell")
    }
}

#[async_trait]
impl CavitySource for UnconfiguredRegistry {
    async fn survey(&self, _location: &Coordinates) -> Result<CavitySurvey, SourceError> {
        Self::unavailable("underground cavity")
    }
}

#[async_trait]
impl ContaminatedSiteRegistry for UnconfiguredRegistry {
    async fn sites_within(
        &self,
        _location: &Coordinates,
        _radius_m: f64,
    ) -> Result<u32, SourceError> {
        Self::unavailable("contaminated site")
    }
}

#[async_trait]
impl SoilInformationZoneRegistry for UnconfiguredRegistry {
    async fn contains(
        &self,
        _location: &Coordinates,
        _municipality_code: Option<&str>,
    ) -> Result<bool, SourceError> {
        Self::unavailable("soil information zone")
    }
}

#[async_trait]
impl IndustrialInstallationRegistry for UnconfiguredRegistry {
    async fn nearest_distance_m(
        &self,
        _location: &Coordinates,
    ) -> Result<Option<f64>, SourceError> {
        Self::unavailable("industrial installation")
    }
}

pub(crate) fn build_service(
    settings: &EvaluationSettings,
) -> MutabilityService<InMemoryEvaluationRepository> {
    let retention = settings.cache_settings().ttl;
    let repository = Arc::new(InMemoryEvaluationRepository::new(retention));
    let registries = Arc::new(UnconfiguredRegistry);
    MutabilityService::new(
        repository,
        NaturalHazardCombiner::new(registries.clone(), registries.clone(), settings),
        PollutionDetector::new(registries.clone(), registries.clone(), registries, settings),
        settings,
    )
}
