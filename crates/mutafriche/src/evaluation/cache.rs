use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::domain::{EvaluationId, ManualAnswers, ParcelId};
use super::repository::{EvaluationRecord, EvaluationRepository, RepositoryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub ttl: Duration,
    pub scan_limit: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(24),
            scan_limit: 10,
        }
    }
}

/// Storage failures are never reported as a plain miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("evaluation cache storage failure: {0}")]
    Storage(#[from] RepositoryError),
}

/// Content-matched cache over persisted evaluations.
///
/// The key is the parcel id plus exact equality of the eight manual answers, absent ones
/// included. Lookup and store
/// are not transactional: two concurrent identical requests may both miss and both write,
/// which only produces duplicate, consistent records.
pub struct EvaluationCache<R> {
    repository: Arc<R>,
    settings: CacheSettings,
}

impl<R> EvaluationCache<R>
where
    R: EvaluationRepository + 'static,
{
    pub fn new(repository: Arc<R>, settings: CacheSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Most recent record within the TTL whose answers match exactly, if any.
    pub async fn find_reusable_result(
        &self,
        parcel_id: &ParcelId,
        answers: &ManualAnswers,
        now: DateTime<Utc>,
    ) -> Result<Option<EvaluationRecord>, CacheError> {
        if answers.has_unknown() {
            debug!(parcel = %parcel_id.0, "unknown answer, cache bypassed");
            return Ok(None);
        }

        let since = now - self.settings.ttl;
        let mut candidates = self
            .repository
            .find_recent_by_parcel(parcel_id, since, self.settings.scan_limit)
            .await?;
        candidates.sort_by(|left, right| right.computed_at.cmp(&left.computed_at));
        candidates.truncate(self.settings.scan_limit);

        let found = candidates.into_iter().find(|candidate| {
            candidate.computed_at >= since
                && !candidate.parcel.answers.has_unknown()
                && candidate.parcel.answers == *answers
        });

        debug!(
            parcel = %parcel_id.0,
            hit = found.is_some(),
            "evaluation cache lookup"
        );
        Ok(found)
    }

    pub async fn store(&self, record: EvaluationRecord) -> Result<EvaluationId, CacheError> {
        Ok(self.repository.save(record).await?)
    }
}
