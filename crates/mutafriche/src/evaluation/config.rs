use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::cache::CacheSettings;
use super::risks::HazardThresholds;

/// What the service does when the cache store cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheFailurePolicy {
    /// Compute anyway and report the cache as unavailable.
    ProceedUncached,
    /// Return the storage error to the caller.
    Abort,
}

impl CacheFailurePolicy {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "proceed_uncached" | "proceed" => Some(Self::ProceedUncached),
            "abort" => Some(Self::Abort),
            _ => None,
        }
    }
}

/// Upper bound on the records a cache lookup may scan.
pub const MAX_CACHE_SCAN_LIMIT: usize = 10;

/// Tunables of the evaluation pipeline. Defaults match the historical constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSettings {
    pub cache_ttl_hours: u32,
    pub cache_scan_limit: usize,
    pub cavity_strong_within_m: f64,
    pub cavity_medium_within_m: f64,
    pub pollution_radius_m: f64,
    pub source_timeout_ms: u64,
    pub cache_failure_policy: CacheFailurePolicy,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            cache_ttl_hours: 24,
            cache_scan_limit: 10,
            cavity_strong_within_m: 500.0,
            cavity_medium_within_m: 1000.0,
            pollution_radius_m: 500.0,
            source_timeout_ms: 5_000,
            cache_failure_policy: CacheFailurePolicy::ProceedUncached,
        }
    }
}

impl EvaluationSettings {
    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            ttl: chrono::Duration::hours(i64::from(self.cache_ttl_hours)),
            scan_limit: self.cache_scan_limit,
        }
    }

    pub fn hazard_thresholds(&self) -> HazardThresholds {
        HazardThresholds {
            strong_within_m: self.cavity_strong_within_m,
            medium_within_m: self.cavity_medium_within_m,
        }
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms)
    }
}
