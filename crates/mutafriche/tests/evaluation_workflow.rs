use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mutafriche::evaluation::risks::{
    CavitySource, CavitySurvey, ClayShrinkSwellSource, ContaminatedSiteRegistry,
    IndustrialInstallationRegistry, NaturalHazardCombiner, PollutionDetector,
    SoilInformationZoneRegistry, SourceError,
};
use mutafriche::evaluation::{
    catalog, AccessRoadQuality, ArchitecturalValue, BuildingCondition, CacheStatus, Coordinates,
    Criterion, EvaluationId, EvaluationRecord, EvaluationRepository, EvaluationRequest,
    EvaluationSettings, GreenBlueCorridor, KnownPollution, LandscapeQuality, ManualAnswers,
    MutabilityService, OwnershipType, ParcelId, RegulatoryZoning, RepositoryError, RequestOrigin,
    SiteData, Usage, WaterConnection,
};

#[derive(Default)]
struct VecRepository {
    records: Mutex<Vec<EvaluationRecord>>,
}

#[async_trait]
impl EvaluationRepository for VecRepository {
    async fn save(&self, record: EvaluationRecord) -> Result<EvaluationId, RepositoryError> {
        let id = record.id.clone();
        self.records.lock().expect("mutex poisoned").push(record);
        Ok(id)
    }

    async fn find_by_id(
        &self,
        id: &EvaluationId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    async fn find_recent_by_parcel(
        &self,
        parcel_id: &ParcelId,
        since: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("mutex poisoned");
        let mut recent: Vec<EvaluationRecord> = guard
            .iter()
            .rev()
            .filter(|record| record.parcel_id() == parcel_id && record.computed_at >= since)
            .cloned()
            .collect();
        recent.truncate(limit);
        Ok(recent)
    }
}

/// Registries for a former industrial site next to a regulated installation.
struct FormerFactoryRegistries;

#[async_trait]
impl ClayShrinkSwellSource for FormerFactoryRegistries {
    async fn exposure(&self, _location: &Coordinates) -> Result<Option<String>, SourceError> {
        Ok(Some("Exposition faible".to_string()))
    }
}

#[async_trait]
impl CavitySource for FormerFactoryRegistries {
    async fn survey(&self, _location: &Coordinates) -> Result<CavitySurvey, SourceError> {
        Err(SourceError::InvalidResponse("unexpected payload".to_string()))
    }
}

#[async_trait]
impl ContaminatedSiteRegistry for FormerFactoryRegistries {
    async fn sites_within(
        &self,
        _location: &Coordinates,
        _radius_m: f64,
    ) -> Result<u32, SourceError> {
        Ok(0)
    }
}

#[async_trait]
impl SoilInformationZoneRegistry for FormerFactoryRegistries {
    async fn contains(
        &self,
        _location: &Coordinates,
        _municipality_code: Option<&str>,
    ) -> Result<bool, SourceError> {
        Ok(false)
    }
}

#[async_trait]
impl IndustrialInstallationRegistry for FormerFactoryRegistries {
    async fn nearest_distance_m(
        &self,
        _location: &Coordinates,
    ) -> Result<Option<f64>, SourceError> {
        Ok(Some(220.0))
    }
}

fn service(repository: Arc<VecRepository>) -> MutabilityService<VecRepository> {
    let settings = EvaluationSettings::default();
    let registries = Arc::new(FormerFactoryRegistries);
    MutabilityService::new(
        repository,
        NaturalHazardCombiner::new(registries.clone(), registries.clone(), &settings),
        PollutionDetector::new(
            registries.clone(),
            registries.clone(),
            registries,
            &settings,
        ),
        &settings,
    )
}

fn former_factory() -> EvaluationRequest {
    EvaluationRequest {
        parcel_id: ParcelId("59350000AK0210".to_string()),
        location: Some(Coordinates {
            latitude: 50.6292,
            longitude: 3.0573,
        }),
        municipality_code: Some("59350".to_string()),
        site: SiteData {
            site_area_m2: Some(68_000.0),
            built_area_m2: Some(21_000.0),
            housing_vacancy_rate: Some(8.1),
            highway_distance_m: Some(900.0),
            transit_distance_m: Some(1_400.0),
            grid_connection_distance_m: Some(600.0),
            in_town_centre: Some(false),
            shops_and_services_nearby: Some(false),
            technological_risk: Some(true),
            regulatory_zoning: Some(RegulatoryZoning::EconomicActivity),
            ..SiteData::default()
        },
        answers: ManualAnswers {
            ownership: Some(OwnershipType::Private),
            water_connection: Some(WaterConnection::Connected),
            building_condition: Some(BuildingCondition::Ruined),
            known_pollution: Some(KnownPollution::OtherCompounds),
            architectural_value: Some(ArchitecturalValue::NoInterest),
            landscape_quality: Some(LandscapeQuality::Degraded),
            access_road: Some(AccessRoadQuality::Accessible),
            green_blue_corridor: Some(GreenBlueCorridor::Outside),
        },
        origin: RequestOrigin {
            channel: "iframe".to_string(),
            integrator: Some("observatoire-friches".to_string()),
        },
    }
}

#[tokio::test]
async fn former_factory_is_ranked_for_industry_and_replayed_on_repeat() {
    catalog::validate().expect("catalog is consistent");
    let repository = Arc::new(VecRepository::default());
    let service = service(repository.clone());

    let first = service
        .evaluate(former_factory())
        .await
        .expect("first evaluation");
    assert_eq!(first.cache, CacheStatus::Miss);

    let pollution = first.pollution.as_ref().expect("pollution resolved");
    assert!(pollution.flagged);
    let hazards = first.natural_hazards.as_ref().expect("hazards resolved");
    assert_eq!(hazards.sources_failed.len(), 1);

    let ranking: Vec<Usage> = first.record.results.iter().map(|r| r.usage).collect();
    assert_eq!(&ranking[..3], &[Usage::GroundSolar, Usage::Industry, Usage::Renaturation]);
    assert_eq!(ranking[6], Usage::Residential);
    assert_eq!(
        first.missing_criteria,
        vec![Criterion::EnvironmentalZoning, Criterion::HeritageZoning]
    );

    let second = service
        .evaluate(former_factory())
        .await
        .expect("second evaluation");
    assert_eq!(second.cache, CacheStatus::Hit);
    assert_eq!(second.record.reused_from.as_ref(), Some(&first.record.id));
    assert_eq!(second.record.results, first.record.results);
    assert_eq!(second.record.origin.channel, "iframe");

    let view = serde_json::to_value(second.view()).expect("view serializes");
    assert_eq!(view["reusedFrom"], first.record.id.0.as_str());
    assert_eq!(view["cache"], "hit");
    assert_eq!(repository.records.lock().expect("mutex poisoned").len(), 2);
}
