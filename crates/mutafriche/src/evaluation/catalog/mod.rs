//! Static score rules: one weight and one impact table per criterion.
//!
//! Lookups are pure. Coverage is enforced by exhaustive matches over [`CriterionValue`], so an
//! unmapped criterion value fails to compile rather than surfacing at runtime.

mod numeric;
mod tables;

pub use numeric::{Bound, NumericBucket, NumericRule};

use super::domain::{Criterion, CriterionValue, ImpactScore, Usage};

/// One impact per use case, stored in `Usage::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageImpacts([ImpactScore; 7]);

impl UsageImpacts {
    pub const fn new(impacts: [ImpactScore; 7]) -> Self {
        Self(impacts)
    }

    pub fn for_usage(&self, usage: Usage) -> ImpactScore {
        self.0[usage.position()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Usage, ImpactScore)> + '_ {
        Usage::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl Criterion {
    /// Fixed importance weight of the criterion.
    pub fn weight(self) -> f64 {
        match self {
            Criterion::SiteArea
            | Criterion::RegulatoryZoning
            | Criterion::BuildingCondition
            | Criterion::KnownPollution => 2.0,
            Criterion::HighwayDistance | Criterion::AccessRoad => 0.5,
            Criterion::BuiltArea
            | Criterion::HousingVacancyRate
            | Criterion::TransitDistance
            | Criterion::GridConnectionDistance
            | Criterion::TownCentre
            | Criterion::ShopsAndServices
            | Criterion::TechnologicalRisk
            | Criterion::NaturalHazard
            | Criterion::PollutionDetected
            | Criterion::EnvironmentalZoning
            | Criterion::HeritageZoning
            | Criterion::Ownership
            | Criterion::WaterConnection
            | Criterion::ArchitecturalValue
            | Criterion::LandscapeQuality
            | Criterion::GreenBlueCorridor => 1.0,
        }
    }
}

/// Sum of every criterion weight in the catalog.
pub fn total_weight() -> f64 {
    Criterion::ALL
        .into_iter()
        .map(Criterion::weight)
        .sum()
}

/// Bucketing rule for numeric criteria; `None` for categorical and boolean ones.
pub fn numeric_rule(criterion: Criterion) -> Option<&'static NumericRule> {
    match criterion {
        Criterion::SiteArea => Some(&tables::SITE_AREA),
        Criterion::BuiltArea => Some(&tables::BUILT_AREA),
        Criterion::HousingVacancyRate => Some(&tables::HOUSING_VACANCY_RATE),
        Criterion::HighwayDistance => Some(&tables::HIGHWAY_DISTANCE),
        Criterion::TransitDistance => Some(&tables::TRANSIT_DISTANCE),
        Criterion::GridConnectionDistance => Some(&tables::GRID_CONNECTION_DISTANCE),
        _ => None,
    }
}

/// Bucket a numeric value falls into.
pub fn bucket_for(value: &CriterionValue) -> Option<NumericBucket> {
    let measure = value.measure()?;
    numeric_rule(value.criterion()).map(|rule| rule.bucket(measure))
}

/// Impact of a criterion value on every use case.
///
/// Returns `None` only for the "don't know" sentinel of manual answers.
pub fn lookup_impact(value: &CriterionValue) -> Option<UsageImpacts> {
    match value {
        CriterionValue::SiteArea(m2) => Some(tables::SITE_AREA.bucket(*m2).impacts),
        CriterionValue::BuiltArea(m2) => Some(tables::BUILT_AREA.bucket(*m2).impacts),
        CriterionValue::HousingVacancyRate(rate) => {
            Some(tables::HOUSING_VACANCY_RATE.bucket(*rate).impacts)
        }
        CriterionValue::HighwayDistance(m) => Some(tables::HIGHWAY_DISTANCE.bucket(*m).impacts),
        CriterionValue::TransitDistance(m) => Some(tables::TRANSIT_DISTANCE.bucket(*m).impacts),
        CriterionValue::GridConnectionDistance(m) => {
            Some(tables::GRID_CONNECTION_DISTANCE.bucket(*m).impacts)
        }
        CriterionValue::TownCentre(inside) => Some(tables::town_centre(*inside)),
        CriterionValue::ShopsAndServices(nearby) => Some(tables::shops_and_services(*nearby)),
        CriterionValue::TechnologicalRisk(present) => Some(tables::technological_risk(*present)),
        CriterionValue::NaturalHazard(level) => Some(tables::natural_hazard(*level)),
        CriterionValue::PollutionDetected(flagged) => Some(tables::pollution_detected(*flagged)),
        CriterionValue::EnvironmentalZoning(zoning) => {
            Some(tables::environmental_zoning(*zoning))
        }
        CriterionValue::RegulatoryZoning(zoning) => Some(tables::regulatory_zoning(*zoning)),
        CriterionValue::HeritageZoning(zoning) => Some(tables::heritage_zoning(*zoning)),
        CriterionValue::Ownership(owner) => tables::ownership(*owner),
        CriterionValue::WaterConnection(connection) => tables::water_connection(*connection),
        CriterionValue::BuildingCondition(condition) => tables::building_condition(*condition),
        CriterionValue::KnownPollution(pollution) => tables::known_pollution(*pollution),
        CriterionValue::ArchitecturalValue(value) => tables::architectural_value(*value),
        CriterionValue::LandscapeQuality(quality) => tables::landscape_quality(*quality),
        CriterionValue::AccessRoad(quality) => tables::access_road(*quality),
        CriterionValue::GreenBlueCorridor(corridor) => tables::green_blue_corridor(*corridor),
    }
}

/// Structural problems detected in the catalog at startup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("criterion {0:?} has weight {1}, expected 0.5, 1 or 2")]
    UnsupportedWeight(Criterion, f64),
    #[error("numeric criterion {0:?} has no bucketing rule")]
    MissingNumericRule(Criterion),
    #[error("bucket thresholds for {0:?} are not strictly ascending")]
    UnorderedThresholds(Criterion),
}

/// Fail-fast sanity check of the catalog, run once at startup.
pub fn validate() -> Result<(), CatalogError> {
    for criterion in Criterion::ALL {
        let weight = criterion.weight();
        if ![0.5, 1.0, 2.0].contains(&weight) {
            return Err(CatalogError::UnsupportedWeight(criterion, weight));
        }

        let rule = numeric_rule(criterion);
        if criterion.kind() == super::domain::CriterionKind::Numeric && rule.is_none() {
            return Err(CatalogError::MissingNumericRule(criterion));
        }
        if let Some(rule) = rule {
            if !rule.thresholds_ascending() {
                return Err(CatalogError::UnorderedThresholds(criterion));
            }
        }
    }

    Ok(())
}
