//! Risk combiners that reduce several external signals into one scoring input.

pub mod natural;
pub mod pollution;
pub mod sources;

pub use natural::{
    combine, HazardSource, HazardThresholds, NaturalHazardAssessment, NaturalHazardCombiner,
};
pub use pollution::{PollutionDetection, PollutionDetector, PollutionSource};
pub use sources::{
    CavitySource, CavitySurvey, ClayShrinkSwellSource, ContaminatedSiteRegistry,
    IndustrialInstallationRegistry, SoilInformationZoneRegistry, SourceError,
};
