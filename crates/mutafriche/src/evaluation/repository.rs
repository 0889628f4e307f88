use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{EvaluationId, ParcelId, ParcelRecord, RequestOrigin};
use super::engine::{Reliability, UsageResult};

/// Immutable snapshot of one computed (or replayed) evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: EvaluationId,
    pub parcel: ParcelRecord,
    pub results: Vec<UsageResult>,
    pub reliability: Reliability,
    pub computed_at: DateTime<Utc>,
    pub origin: RequestOrigin,
    /// Set when the results were replayed from an earlier record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reused_from: Option<EvaluationId>,
}

impl EvaluationRecord {
    pub fn parcel_id(&self) -> &ParcelId {
        &self.parcel.parcel_id
    }

    /// New record carrying this record's results verbatim, with fresh provenance.
    pub fn replay(&self, id: EvaluationId, at: DateTime<Utc>, origin: RequestOrigin) -> Self {
        Self {
            id,
            parcel: self.parcel.clone(),
            results: self.results.clone(),
            reliability: self.reliability,
            computed_at: at,
            origin,
            reused_from: Some(self.id.clone()),
        }
    }

    pub fn is_replay(&self) -> bool {
        self.reused_from.is_some()
    }
}

/// Persistence contract for evaluation snapshots.
#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    async fn save(&self, record: EvaluationRecord) -> Result<EvaluationId, RepositoryError>;
    async fn find_by_id(&self, id: &EvaluationId)
        -> Result<Option<EvaluationRecord>, RepositoryError>;
    /// Records of the parcel computed at or after `since`, newest first, at most `limit`.
    async fn find_recent_by_parcel(
        &self,
        parcel_id: &ParcelId,
        since: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
