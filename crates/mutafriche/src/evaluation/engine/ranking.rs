use serde::{Deserialize, Serialize};

use super::super::domain::Usage;
use super::rules::ScoreSheet;

/// Mutability index and rank of one use case. Rank 7 is the most favourable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageResult {
    pub usage: Usage,
    pub index: f64,
    pub rank: u8,
}

/// Ranks use cases by ascending index.
///
/// The sort is stable over `Usage::ALL`, so on equal indices the use case declared first
/// receives the lower rank. Results come back most favourable first.
pub(crate) fn rank_usages(sheet: &ScoreSheet) -> Vec<UsageResult> {
    let mut indexed: Vec<(Usage, f64)> = Usage::ALL
        .into_iter()
        .map(|usage| (usage, sheet.tally(usage).mutability_index()))
        .collect();

    indexed.sort_by(|left, right| left.1.total_cmp(&right.1));

    let mut results: Vec<UsageResult> = indexed
        .into_iter()
        .zip(1u8..)
        .map(|((usage, index), rank)| UsageResult { usage, index, rank })
        .collect();
    results.reverse();
    results
}
