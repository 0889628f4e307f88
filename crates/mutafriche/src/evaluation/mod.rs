//! Mutability evaluation of derelict parcels.
//!
//! A parcel record (enriched site data plus questionnaire answers) is scored against a fixed
//! catalog of weighted criteria for seven redevelopment use cases. The service in front of
//! the engine replays recent identical evaluations from the cache and resolves the natural
//! hazard and pollution inputs from external registries before scoring.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod repository;
pub mod risks;
pub mod router;
pub mod service;
pub mod view;

#[cfg(test)]
mod tests;

pub use cache::{CacheError, CacheSettings, EvaluationCache};
pub use catalog::{lookup_impact, total_weight, CatalogError, UsageImpacts};
pub use config::{CacheFailurePolicy, EvaluationSettings};
pub use domain::{
    AccessRoadQuality, ArchitecturalValue, BuildingCondition, Coordinates, Criterion,
    CriterionKind, CriterionValue, EnvironmentalZoning, EvaluationId, GreenBlueCorridor,
    HazardLevel, HeritageZoning, ImpactScore, KnownPollution, LandscapeQuality, ManualAnswers,
    OwnershipType, ParcelId, ParcelRecord, RegulatoryZoning, RequestOrigin, SiteData, Usage,
    WaterConnection,
};
pub use engine::{
    compute_reliability, EvaluationError, MutabilityEngine, MutabilityOutcome, Reliability,
    ReliabilityTier, UsageBreakdown, UsageResult,
};
pub use repository::{EvaluationRecord, EvaluationRepository, RepositoryError};
pub use router::evaluation_router;
pub use service::{
    CacheStatus, EvaluationReport, EvaluationRequest, MutabilityService, ServiceError,
};
pub use view::{EvaluationView, ReliabilityView, UsageResultView};
