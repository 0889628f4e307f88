//! Contracts of the external registries queried by the risk combiners.
//!
//! Concrete HTTP clients live outside this crate. Every call returns a `Result`; nothing is
//! expected to panic across this boundary.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::evaluation::domain::Coordinates;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),
    #[error("invalid response from source: {0}")]
    InvalidResponse(String),
    #[error("source timed out after {0:?}")]
    Timeout(Duration),
}

/// Result of an underground-cavity search around the parcel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CavitySurvey {
    pub cavities_found: u32,
    pub nearest_distance_m: Option<f64>,
}

/// Clay shrink-swell exposure registry. Returns the raw exposure label, if any.
#[async_trait]
pub trait ClayShrinkSwellSource: Send + Sync {
    async fn exposure(&self, location: &Coordinates) -> Result<Option<String>, SourceError>;
}

/// Underground cavity inventory.
#[async_trait]
pub trait CavitySource: Send + Sync {
    async fn survey(&self, location: &Coordinates) -> Result<CavitySurvey, SourceError>;
}

/// Registry of known contaminated sites.
#[async_trait]
pub trait ContaminatedSiteRegistry: Send + Sync {
    async fn sites_within(&self, location: &Coordinates, radius_m: f64)
        -> Result<u32, SourceError>;
}

/// Designated soil-information zones.
#[async_trait]
pub trait SoilInformationZoneRegistry: Send + Sync {
    async fn contains(
        &self,
        location: &Coordinates,
        municipality_code: Option<&str>,
    ) -> Result<bool, SourceError>;
}

/// Regulated industrial installations.
#[async_trait]
pub trait IndustrialInstallationRegistry: Send + Sync {
    async fn nearest_distance_m(&self, location: &Coordinates)
        -> Result<Option<f64>, SourceError>;
}

/// Bounds a source call; an elapsed deadline is reported like any other failure.
pub(crate) async fn within<T, F>(limit: Duration, call: F) -> Result<T, SourceError>
where
    F: Future<Output = Result<T, SourceError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(outcome) => outcome,
        Err(_) => Err(SourceError::Timeout(limit)),
    }
}
