use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier of the cadastral parcel (or parcel group) under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParcelId(pub String);

/// Identifier of a persisted evaluation snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

/// WGS84 position of the parcel centroid, used by the hazard and pollution lookups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The seven redevelopment use cases.
///
/// Declaration order matters: it is the tie-break order when two use cases share an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Usage {
    #[serde(rename = "residentiel")]
    Residential,
    #[serde(rename = "equipements")]
    PublicFacilities,
    #[serde(rename = "culture")]
    CultureTourism,
    #[serde(rename = "tertiaire")]
    Tertiary,
    #[serde(rename = "industrie")]
    Industry,
    #[serde(rename = "renaturation")]
    Renaturation,
    #[serde(rename = "photovoltaique")]
    GroundSolar,
}

impl Usage {
    pub const ALL: [Usage; 7] = [
        Usage::Residential,
        Usage::PublicFacilities,
        Usage::CultureTourism,
        Usage::Tertiary,
        Usage::Industry,
        Usage::Renaturation,
        Usage::GroundSolar,
    ];

    pub(crate) fn position(self) -> usize {
        self as usize
    }
}

/// Signed strength of the effect a criterion value has on one use case.
///
/// `Neutral` weighs +0.5 rather than zero so a single neutral answer never empties a
/// use case's evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactScore {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl ImpactScore {
    pub fn value(self) -> f64 {
        match self {
            ImpactScore::VeryNegative => -2.0,
            ImpactScore::Negative => -1.0,
            ImpactScore::Neutral => 0.5,
            ImpactScore::Positive => 1.0,
            ImpactScore::VeryPositive => 2.0,
        }
    }
}

/// Every site attribute the scoring engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    SiteArea,
    BuiltArea,
    HousingVacancyRate,
    HighwayDistance,
    TransitDistance,
    GridConnectionDistance,
    TownCentre,
    ShopsAndServices,
    TechnologicalRisk,
    NaturalHazard,
    PollutionDetected,
    EnvironmentalZoning,
    RegulatoryZoning,
    HeritageZoning,
    Ownership,
    WaterConnection,
    BuildingCondition,
    KnownPollution,
    ArchitecturalValue,
    LandscapeQuality,
    AccessRoad,
    GreenBlueCorridor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    Numeric,
    Boolean,
    Categorical,
}

impl Criterion {
    pub const ALL: [Criterion; 22] = [
        Criterion::SiteArea,
        Criterion::BuiltArea,
        Criterion::HousingVacancyRate,
        Criterion::HighwayDistance,
        Criterion::TransitDistance,
        Criterion::GridConnectionDistance,
        Criterion::TownCentre,
        Criterion::ShopsAndServices,
        Criterion::TechnologicalRisk,
        Criterion::NaturalHazard,
        Criterion::PollutionDetected,
        Criterion::EnvironmentalZoning,
        Criterion::RegulatoryZoning,
        Criterion::HeritageZoning,
        Criterion::Ownership,
        Criterion::WaterConnection,
        Criterion::BuildingCondition,
        Criterion::KnownPollution,
        Criterion::ArchitecturalValue,
        Criterion::LandscapeQuality,
        Criterion::AccessRoad,
        Criterion::GreenBlueCorridor,
    ];

    pub fn kind(self) -> CriterionKind {
        match self {
            Criterion::SiteArea
            | Criterion::BuiltArea
            | Criterion::HousingVacancyRate
            | Criterion::HighwayDistance
            | Criterion::TransitDistance
            | Criterion::GridConnectionDistance => CriterionKind::Numeric,
            Criterion::TownCentre
            | Criterion::ShopsAndServices
            | Criterion::TechnologicalRisk
            | Criterion::PollutionDetected => CriterionKind::Boolean,
            _ => CriterionKind::Categorical,
        }
    }

    /// Whether the value is collected from the manual questionnaire rather than enrichment.
    pub fn is_manual(self) -> bool {
        matches!(
            self,
            Criterion::Ownership
                | Criterion::WaterConnection
                | Criterion::BuildingCondition
                | Criterion::KnownPollution
                | Criterion::ArchitecturalValue
                | Criterion::LandscapeQuality
                | Criterion::AccessRoad
                | Criterion::GreenBlueCorridor
        )
    }
}

/// Ordinal natural-hazard level, also produced by the natural-hazard combiner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardLevel {
    None,
    Low,
    Medium,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentalZoning {
    None,
    Natura2000,
    Znieff,
    ProtectedArea,
}

/// Local planning document zone the parcel falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulatoryZoning {
    Urban,
    ToUrbanise,
    EconomicActivity,
    NaturalOrAgricultural,
    NoPlanningDocument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeritageZoning {
    None,
    MonumentSurroundings,
    RemarkableHeritageSite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipType {
    Public,
    Private,
    SharedOwnership,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterConnection {
    Connected,
    NotConnected,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingCondition {
    Good,
    Degraded,
    Ruined,
    NoBuildings,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownPollution {
    None,
    AlreadyManaged,
    VolatileCompounds,
    OtherCompounds,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchitecturalValue {
    Exceptional,
    Interesting,
    Ordinary,
    NoInterest,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandscapeQuality {
    Remarkable,
    Interesting,
    Ordinary,
    Degraded,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRoadQuality {
    Accessible,
    Degraded,
    Inaccessible,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreenBlueCorridor {
    Outside,
    EcologicalCorridor,
    BiodiversityReservoir,
    Unknown,
}

/// Manual questionnaire answers that offer an explicit "don't know" option.
pub trait ManualAnswer {
    fn is_unknown(&self) -> bool;
}

macro_rules! unknown_sentinel {
    ($($answer:ty),+ $(,)?) => {
        $(impl ManualAnswer for $answer {
            fn is_unknown(&self) -> bool {
                matches!(self, Self::Unknown)
            }
        })+
    };
}

unknown_sentinel!(
    OwnershipType,
    WaterConnection,
    BuildingCondition,
    KnownPollution,
    ArchitecturalValue,
    LandscapeQuality,
    AccessRoadQuality,
    GreenBlueCorridor,
);

/// A single answered criterion. The variant names its criterion, so a value can never be
/// paired with the wrong impact table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "criterion", content = "value", rename_all = "snake_case")]
pub enum CriterionValue {
    SiteArea(f64),
    BuiltArea(f64),
    HousingVacancyRate(f64),
    HighwayDistance(f64),
    TransitDistance(f64),
    GridConnectionDistance(f64),
    TownCentre(bool),
    ShopsAndServices(bool),
    TechnologicalRisk(bool),
    NaturalHazard(HazardLevel),
    PollutionDetected(bool),
    EnvironmentalZoning(EnvironmentalZoning),
    RegulatoryZoning(RegulatoryZoning),
    HeritageZoning(HeritageZoning),
    Ownership(OwnershipType),
    WaterConnection(WaterConnection),
    BuildingCondition(BuildingCondition),
    KnownPollution(KnownPollution),
    ArchitecturalValue(ArchitecturalValue),
    LandscapeQuality(LandscapeQuality),
    AccessRoad(AccessRoadQuality),
    GreenBlueCorridor(GreenBlueCorridor),
}

impl CriterionValue {
    pub fn criterion(&self) -> Criterion {
        match self {
            CriterionValue::SiteArea(_) => Criterion::SiteArea,
            CriterionValue::BuiltArea(_) => Criterion::BuiltArea,
            CriterionValue::HousingVacancyRate(_) => Criterion::HousingVacancyRate,
            CriterionValue::HighwayDistance(_) => Criterion::HighwayDistance,
            CriterionValue::TransitDistance(_) => Criterion::TransitDistance,
            CriterionValue::GridConnectionDistance(_) => Criterion::GridConnectionDistance,
            CriterionValue::TownCentre(_) => Criterion::TownCentre,
            CriterionValue::ShopsAndServices(_) => Criterion::ShopsAndServices,
            CriterionValue::TechnologicalRisk(_) => Criterion::TechnologicalRisk,
            CriterionValue::NaturalHazard(_) => Criterion::NaturalHazard,
            CriterionValue::PollutionDetected(_) => Criterion::PollutionDetected,
            CriterionValue::EnvironmentalZoning(_) => Criterion::EnvironmentalZoning,
            CriterionValue::RegulatoryZoning(_) => Criterion::RegulatoryZoning,
            CriterionValue::HeritageZoning(_) => Criterion::HeritageZoning,
            CriterionValue::Ownership(_) => Criterion::Ownership,
            CriterionValue::WaterConnection(_) => Criterion::WaterConnection,
            CriterionValue::BuildingCondition(_) => Criterion::BuildingCondition,
            CriterionValue::KnownPollution(_) => Criterion::KnownPollution,
            CriterionValue::ArchitecturalValue(_) => Criterion::ArchitecturalValue,
            CriterionValue::LandscapeQuality(_) => Criterion::LandscapeQuality,
            CriterionValue::AccessRoad(_) => Criterion::AccessRoad,
            CriterionValue::GreenBlueCorridor(_) => Criterion::GreenBlueCorridor,
        }
    }

    /// False only for the explicit "don't know" sentinel of manual answers.
    pub fn is_answered(&self) -> bool {
        match self {
            CriterionValue::Ownership(answer) => !answer.is_unknown(),
            CriterionValue::WaterConnection(answer) => !answer.is_unknown(),
            CriterionValue::BuildingCondition(answer) => !answer.is_unknown(),
            CriterionValue::KnownPollution(answer) => !answer.is_unknown(),
            CriterionValue::ArchitecturalValue(answer) => !answer.is_unknown(),
            CriterionValue::LandscapeQuality(answer) => !answer.is_unknown(),
            CriterionValue::AccessRoad(answer) => !answer.is_unknown(),
            CriterionValue::GreenBlueCorridor(answer) => !answer.is_unknown(),
            _ => true,
        }
    }

    pub(crate) fn measure(&self) -> Option<f64> {
        match self {
            CriterionValue::SiteArea(value)
            | CriterionValue::BuiltArea(value)
            | CriterionValue::HousingVacancyRate(value)
            | CriterionValue::HighwayDistance(value)
            | CriterionValue::TransitDistance(value)
            | CriterionValue::GridConnectionDistance(value) => Some(*value),
            _ => None,
        }
    }
}

/// Automatically enriched site data (cadastre, registries, planning documents).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteData {
    pub site_area_m2: Option<f64>,
    pub built_area_m2: Option<f64>,
    pub housing_vacancy_rate: Option<f64>,
    pub highway_distance_m: Option<f64>,
    pub transit_distance_m: Option<f64>,
    pub grid_connection_distance_m: Option<f64>,
    pub in_town_centre: Option<bool>,
    pub shops_and_services_nearby: Option<bool>,
    pub technological_risk: Option<bool>,
    pub natural_hazard: Option<HazardLevel>,
    pub pollution_detected: Option<bool>,
    pub environmental_zoning: Option<EnvironmentalZoning>,
    pub regulatory_zoning: Option<RegulatoryZoning>,
    pub heritage_zoning: Option<HeritageZoning>,
}

/// The eight questionnaire answers supplied by the user. They also form the cache key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualAnswers {
    pub ownership: Option<OwnershipType>,
    pub water_connection: Option<WaterConnection>,
    pub building_condition: Option<BuildingCondition>,
    pub known_pollution: Option<KnownPollution>,
    pub architectural_value: Option<ArchitecturalValue>,
    pub landscape_quality: Option<LandscapeQuality>,
    pub access_road: Option<AccessRoadQuality>,
    pub green_blue_corridor: Option<GreenBlueCorridor>,
}

impl ManualAnswers {
    fn sentinels(&self) -> [Option<bool>; 8] {
        [
            self.ownership.map(|answer| answer.is_unknown()),
            self.water_connection.map(|answer| answer.is_unknown()),
            self.building_condition.map(|answer| answer.is_unknown()),
            self.known_pollution.map(|answer| answer.is_unknown()),
            self.architectural_value.map(|answer| answer.is_unknown()),
            self.landscape_quality.map(|answer| answer.is_unknown()),
            self.access_road.map(|answer| answer.is_unknown()),
            self.green_blue_corridor.map(|answer| answer.is_unknown()),
        ]
    }

    /// True when at least one of the eight answers is the "don't know" sentinel.
    pub fn has_unknown(&self) -> bool {
        self.sentinels().iter().any(|sentinel| *sentinel == Some(true))
    }
}

/// Where an evaluation request came from, kept for analytics on every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOrigin {
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrator: Option<String>,
}

impl RequestOrigin {
    pub fn api() -> Self {
        Self {
            channel: "api".to_string(),
            integrator: None,
        }
    }
}

impl Default for RequestOrigin {
    fn default() -> Self {
        Self::api()
    }
}

/// Everything known about one parcel at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelRecord {
    pub parcel_id: ParcelId,
    #[serde(default)]
    pub site: SiteData,
    #[serde(default)]
    pub answers: ManualAnswers,
}

impl ParcelRecord {
    pub fn new(parcel_id: ParcelId, site: SiteData, answers: ManualAnswers) -> Self {
        Self {
            parcel_id,
            site,
            answers,
        }
    }

    /// Present values keyed by criterion, including "don't know" answers.
    pub fn criteria(&self) -> BTreeMap<Criterion, CriterionValue> {
        let site = &self.site;
        let answers = &self.answers;
        let values = [
            site.site_area_m2.map(CriterionValue::SiteArea),
            site.built_area_m2.map(CriterionValue::BuiltArea),
            site.housing_vacancy_rate.map(CriterionValue::HousingVacancyRate),
            site.highway_distance_m.map(CriterionValue::HighwayDistance),
            site.transit_distance_m.map(CriterionValue::TransitDistance),
            site.grid_connection_distance_m.map(CriterionValue::GridConnectionDistance),
            site.in_town_centre.map(CriterionValue::TownCentre),
            site.shops_and_services_nearby.map(CriterionValue::ShopsAndServices),
            site.technological_risk.map(CriterionValue::TechnologicalRisk),
            site.natural_hazard.map(CriterionValue::NaturalHazard),
            site.pollution_detected.map(CriterionValue::PollutionDetected),
            site.environmental_zoning.map(CriterionValue::EnvironmentalZoning),
            site.regulatory_zoning.map(CriterionValue::RegulatoryZoning),
            site.heritage_zoning.map(CriterionValue::HeritageZoning),
            answers.ownership.map(CriterionValue::Ownership),
            answers.water_connection.map(CriterionValue::WaterConnection),
            answers.building_condition.map(CriterionValue::BuildingCondition),
            answers.known_pollution.map(CriterionValue::KnownPollution),
            answers.architectural_value.map(CriterionValue::ArchitecturalValue),
            answers.landscape_quality.map(CriterionValue::LandscapeQuality),
            answers.access_road.map(CriterionValue::AccessRoad),
            answers.green_blue_corridor.map(CriterionValue::GreenBlueCorridor),
        ];

        values
            .into_iter()
            .flatten()
            .map(|value| (value.criterion(), value))
            .collect()
    }

    /// Criteria that are absent or answered with "don't know", in catalog order.
    pub fn missing_criteria(&self) -> Vec<Criterion> {
        let values = self.criteria();
        Criterion::ALL
            .into_iter()
            .filter(|criterion| {
                !values
                    .get(criterion)
                    .map(CriterionValue::is_answered)
                    .unwrap_or(false)
            })
            .collect()
    }
}
