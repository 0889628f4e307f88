use std::sync::Arc;
use std::time::Duration;

use futures::future::{join_all, BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, warn, Instrument};

use super::sources::{
    within, ContaminatedSiteRegistry, IndustrialInstallationRegistry, SoilInformationZoneRegistry,
    SourceError,
};
use crate::evaluation::config::EvaluationSettings;
use crate::evaluation::domain::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PollutionSource {
    ContaminatedSites,
    SoilInformationZones,
    IndustrialInstallations,
}

impl PollutionSource {
    pub fn name(self) -> &'static str {
        match self {
            PollutionSource::ContaminatedSites => "contaminated-sites",
            PollutionSource::SoilInformationZones => "soil-information-zones",
            PollutionSource::IndustrialInstallations => "industrial-installations",
        }
    }
}

/// Outcome of the pollution fan-out.
///
/// `flagged` is the OR of the sources that answered. When every source failed it is `false`
/// and `sources_used` is empty: callers tell "nothing found" from "could not tell" through
/// `sources_failed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutionDetection {
    pub flagged: bool,
    pub sources_used: Vec<PollutionSource>,
    pub sources_failed: Vec<PollutionSource>,
}

impl PollutionDetection {
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (PollutionSource, Result<bool, SourceError>)>,
    {
        let mut detection = Self {
            flagged: false,
            sources_used: Vec::new(),
            sources_failed: Vec::new(),
        };

        for (source, outcome) in outcomes {
            match outcome {
                Ok(hit) => {
                    detection.flagged |= hit;
                    detection.sources_used.push(source);
                }
                Err(error) => {
                    warn!(source = source.name(), %error, "pollution source failed");
                    detection.sources_failed.push(source);
                }
            }
        }

        detection
    }

    pub fn is_determined(&self) -> bool {
        !self.sources_used.is_empty()
    }
}

type Check<'a> = BoxFuture<'a, (PollutionSource, Result<bool, SourceError>)>;

/// Runs the three pollution checks concurrently, each isolated behind its own timeout.
#[derive(Clone)]
pub struct PollutionDetector {
    contaminated_sites: Arc<dyn ContaminatedSiteRegistry>,
    soil_zones: Arc<dyn SoilInformationZoneRegistry>,
    installations: Arc<dyn IndustrialInstallationRegistry>,
    radius_m: f64,
    timeout: Duration,
}

impl PollutionDetector {
    pub fn new(
        contaminated_sites: Arc<dyn ContaminatedSiteRegistry>,
        soil_zones: Arc<dyn SoilInformationZoneRegistry>,
        installations: Arc<dyn IndustrialInstallationRegistry>,
        settings: &EvaluationSettings,
    ) -> Self {
        Self {
            contaminated_sites,
            soil_zones,
            installations,
            radius_m: settings.pollution_radius_m,
            timeout: settings.source_timeout(),
        }
    }

    pub async fn detect(
        &self,
        location: &Coordinates,
        municipality_code: Option<&str>,
    ) -> PollutionDetection {
        let radius_m = self.radius_m;
        let limit = self.timeout;

        let checks: Vec<Check<'_>> = vec![
            async move {
                let lookup = self.contaminated_sites.sites_within(location, radius_m);
                let outcome = within(limit, lookup).await.map(|count| count > 0);
                (PollutionSource::ContaminatedSites, outcome)
            }
            .instrument(info_span!("pollution_check", source = "contaminated-sites"))
            .boxed(),
            async move {
                let outcome =
                    within(limit, self.soil_zones.contains(location, municipality_code)).await;
                (PollutionSource::SoilInformationZones, outcome)
            }
            .instrument(info_span!("pollution_check", source = "soil-information-zones"))
            .boxed(),
            async move {
                let outcome = within(limit, self.installations.nearest_distance_m(location))
                    .await
                    .map(|nearest| nearest.is_some_and(|distance| distance <= radius_m));
                (PollutionSource::IndustrialInstallations, outcome)
            }
            .instrument(info_span!("pollution_check", source = "industrial-installations"))
            .boxed(),
        ];

        // Settle every branch; a failure never short-circuits the others.
        let outcomes = join_all(checks).await;
        let detection = PollutionDetection::from_outcomes(outcomes);
        debug!(
            flagged = detection.flagged,
            used = detection.sources_used.len(),
            failed = detection.sources_failed.len(),
            "pollution detection settled"
        );
        detection
    }
}
