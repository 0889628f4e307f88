use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::evaluation::domain::{
    AccessRoadQuality, ArchitecturalValue, BuildingCondition, Coordinates, EnvironmentalZoning,
    EvaluationId, GreenBlueCorridor, HazardLevel, HeritageZoning, KnownPollution,
    LandscapeQuality, ManualAnswers, OwnershipType, ParcelId, ParcelRecord, RegulatoryZoning,
    RequestOrigin, SiteData, WaterConnection,
};
use crate::evaluation::engine::MutabilityEngine;
use crate::evaluation::repository::{EvaluationRecord, EvaluationRepository, RepositoryError};
use crate::evaluation::risks::{
    CavitySource, CavitySurvey, ClayShrinkSwellSource, ContaminatedSiteRegistry,
    IndustrialInstallationRegistry, NaturalHazardCombiner, PollutionDetector,
    SoilInformationZoneRegistry, SourceError,
};
use crate::evaluation::{EvaluationRequest, EvaluationSettings, MutabilityService};

pub(super) fn parcel_id() -> ParcelId {
    ParcelId("75056000AB0012".to_string())
}

pub(super) fn location() -> Coordinates {
    Coordinates {
        latitude: 48.8566,
        longitude: 2.3522,
    }
}

pub(super) fn settings() -> EvaluationSettings {
    EvaluationSettings {
        source_timeout_ms: 50,
        ..EvaluationSettings::default()
    }
}

pub(super) fn site_with_area(area_m2: f64) -> SiteData {
    SiteData {
        site_area_m2: Some(area_m2),
        ..SiteData::default()
    }
}

/// Every automatic field filled in, including the two risk-derived ones.
pub(super) fn full_site() -> SiteData {
    SiteData {
        site_area_m2: Some(12_500.0),
        built_area_m2: Some(3_200.0),
        housing_vacancy_rate: Some(6.5),
        highway_distance_m: Some(1_800.0),
        transit_distance_m: Some(350.0),
        grid_connection_distance_m: Some(2_400.0),
        in_town_centre: Some(true),
        shops_and_services_nearby: Some(true),
        technological_risk: Some(false),
        natural_hazard: Some(HazardLevel::Low),
        pollution_detected: Some(false),
        environmental_zoning: Some(EnvironmentalZoning::None),
        regulatory_zoning: Some(RegulatoryZoning::Urban),
        heritage_zoning: Some(HeritageZoning::MonumentSurroundings),
    }
}

/// Automatic fields without the two that the risk combiners resolve.
pub(super) fn site_awaiting_risks() -> SiteData {
    SiteData {
        natural_hazard: None,
        pollution_detected: None,
        ..full_site()
    }
}

pub(super) fn complete_answers() -> ManualAnswers {
    ManualAnswers {
        ownership: Some(OwnershipType::Public),
        water_connection: Some(WaterConnection::Connected),
        building_condition: Some(BuildingCondition::Degraded),
        known_pollution: Some(KnownPollution::AlreadyManaged),
        architectural_value: Some(ArchitecturalValue::Interesting),
        landscape_quality: Some(LandscapeQuality::Ordinary),
        access_road: Some(AccessRoadQuality::Accessible),
        green_blue_corridor: Some(GreenBlueCorridor::Outside),
    }
}

pub(super) fn full_record() -> ParcelRecord {
    ParcelRecord::new(parcel_id(), full_site(), complete_answers())
}

pub(super) fn request(site: SiteData, answers: ManualAnswers) -> EvaluationRequest {
    EvaluationRequest {
        parcel_id: parcel_id(),
        location: Some(location()),
        municipality_code: Some("75056".to_string()),
        site,
        answers,
        origin: RequestOrigin::api(),
    }
}

/// A computed record for the test parcel, stamped at `computed_at`.
pub(super) fn stored_record(
    id: &str,
    answers: ManualAnswers,
    computed_at: DateTime<Utc>,
) -> EvaluationRecord {
    let parcel = ParcelRecord::new(parcel_id(), full_site(), answers);
    let outcome = MutabilityEngine::new()
        .evaluate(&parcel)
        .expect("fixture parcel evaluates");
    EvaluationRecord {
        id: EvaluationId(id.to_string()),
        parcel,
        results: outcome.results,
        reliability: outcome.reliability,
        computed_at,
        origin: RequestOrigin::api(),
        reused_from: None,
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<Vec<EvaluationRecord>>,
    lookups: AtomicUsize,
}

impl MemoryRepository {
    pub(super) fn seeded(records: Vec<EvaluationRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            lookups: AtomicUsize::new(0),
        }
    }

    pub(super) fn records(&self) -> Vec<EvaluationRecord> {
        self.records.lock().expect("repository mutex poisoned").clone()
    }

    pub(super) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EvaluationRepository for MemoryRepository {
    async fn save(&self, record: EvaluationRecord) -> Result<EvaluationId, RepositoryError> {
        let id = record.id.clone();
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .push(record);
        Ok(id)
    }

    async fn find_by_id(
        &self,
        id: &EvaluationId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    async fn find_recent_by_parcel(
        &self,
        parcel_id: &ParcelId,
        since: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let guard = self.records.lock().expect("repository mutex poisoned");
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

pub(super) struct UnavailableRepository;

#[async_trait]
impl EvaluationRepository for UnavailableRepository {
    async fn save(&self, _record: EvaluationRecord) -> Result<EvaluationId, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn find_by_id(
        &self,
        _id: &EvaluationId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn find_recent_by_parcel(
        &self,
        _parcel_id: &ParcelId,
        _since: DateTime<Utc>,
        _limit: usize,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Store that assigns its own ids, ignoring the one carried by the record.
#[derive(Default)]
pub(super) struct AssigningRepository {
    inner: MemoryRepository,
    sequence: AtomicUsize,
}

#[async_trait]
impl EvaluationRepository for AssigningRepository {
    async fn save(&self, mut record: EvaluationRecord) -> Result<EvaluationId, RepositoryError> {
        let next = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        record.id = EvaluationId(format!("db-{next}"));
        self.inner.save(record).await
    }

    async fn find_by_id(
        &self,
        id: &EvaluationId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError> {
        self.inner.find_by_id(id).await
    }

    async fn find_recent_by_parcel(
        &self,
        parcel_id: &ParcelId,
        since: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        self.inner.find_recent_by_parcel(parcel_id, since, limit).await
    }
}

/// Canned registry answer with an optional delay and a call counter.
pub(super) struct Stub<T> {
    outcome: Result<T, SourceError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl<T: Clone + Send + Sync> Stub<T> {
    pub(super) fn ok(value: T) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(value),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub(super) fn failing() -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(SourceError::Unavailable("registry offline".to_string())),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub(super) fn slow(value: T, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(value),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer(&self) -> Result<T, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}

#[async_trait]
impl ClayShrinkSwellSource for Stub<Option<String>> {
    async fn exposure(&self, _location: &Coordinates) -> Result<Option<String>, SourceError> {
        self.answer().await
    }
}

#[async_trait]
impl CavitySource for Stub<CavitySurvey> {
    async fn survey(&self, _location: &Coordinates) -> Result<CavitySurvey, SourceError> {
        self.answer().await
    }
}

#[async_trait]
impl ContaminatedSiteRegistry for Stub<u32> {
    async fn sites_within(
        &self,
        _location: &Coordinates,
        _radius_m: f64,
    ) -> Result<u32, SourceError> {
        self.answer().await
    }
}

#[async_trait]
impl SoilInformationZoneRegistry for Stub<bool> {
    async fn contains(
        &self,
        _location: &Coordinates,
        _municipality_code: Option<&str>,
    ) -> Result<bool, SourceError> {
        self.answer().await
    }
}

#[async_trait]
impl IndustrialInstallationRegistry for Stub<Option<f64>> {
    async fn nearest_distance_m(
        &self,
        _location: &Coordinates,
    ) -> Result<Option<f64>, SourceError> {
        self.answer().await
    }
}

pub(super) fn no_cavities() -> CavitySurvey {
    CavitySurvey {
        cavities_found: 0,
        nearest_distance_m: None,
    }
}

/// The five registries behind the risk combiners.
pub(super) struct Sources {
    pub(super) clay: Arc<Stub<Option<String>>>,
    pub(super) cavities: Arc<Stub<CavitySurvey>>,
    pub(super) contaminated_sites: Arc<Stub<u32>>,
    pub(super) soil_zones: Arc<Stub<bool>>,
    pub(super) installations: Arc<Stub<Option<f64>>>,
}

impl Sources {
    /// Every registry answers and finds nothing.
    pub(super) fn quiet() -> Self {
        Self {
            clay: Stub::ok(None),
            cavities: Stub::ok(no_cavities()),
            contaminated_sites: Stub::ok(0),
            soil_zones: Stub::ok(false),
            installations: Stub::ok(None),
        }
    }

    pub(super) fn hazards(&self, settings: &EvaluationSettings) -> NaturalHazardCombiner {
        NaturalHazardCombiner::new(self.clay.clone(), self.cavities.clone(), settings)
    }

    pub(super) fn pollution(&self, settings: &EvaluationSettings) -> PollutionDetector {
        PollutionDetector::new(
            self.contaminated_sites.clone(),
            self.soil_zones.clone(),
            self.installations.clone(),
            settings,
        )
    }

    pub(super) fn pollution_calls(&self) -> usize {
        self.contaminated_sites.calls() + self.soil_zones.calls() + self.installations.calls()
    }

    pub(super) fn hazard_calls(&self) -> usize {
        self.clay.calls() + self.cavities.calls()
    }
}

pub(super) fn service_with<R>(
    repository: Arc<R>,
    sources: &Sources,
    settings: &EvaluationSettings,
) -> MutabilityService<R>
where
    R: EvaluationRepository + 'static,
{
    MutabilityService::new(
        repository,
        sources.hazards(settings),
        sources.pollution(settings),
        settings,
    )
}

pub(super) fn build_service() -> (
    MutabilityService<MemoryRepository>,
    Arc<MemoryRepository>,
    Sources,
) {
    let repository = Arc::new(MemoryRepository::default());
    let sources = Sources::quiet();
    let service = service_with(repository.clone(), &sources, &settings());
    (service, repository, sources)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
