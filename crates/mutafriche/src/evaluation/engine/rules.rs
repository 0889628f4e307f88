use super::super::catalog::lookup_impact;
use super::super::domain::{Criterion, ParcelRecord, Usage};

/// Weighted evidence accumulated for one use case.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct UsageTally {
    pub advantages: f64,
    pub constraints: f64,
}

impl UsageTally {
    fn add(&mut self, weighted: f64) {
        if weighted > 0.0 {
            self.advantages += weighted;
        } else if weighted < 0.0 {
            self.constraints += -weighted;
        }
    }

    /// Share of advantages in the total evidence, as a percentage with one decimal.
    pub fn mutability_index(&self) -> f64 {
        let total = self.advantages + self.constraints;
        if total == 0.0 {
            return 0.0;
        }
        (self.advantages / total * 1000.0).round() / 10.0
    }
}

pub(crate) struct ScoreSheet {
    pub tallies: [UsageTally; 7],
    pub missing: Vec<Criterion>,
}

impl ScoreSheet {
    pub fn tally(&self, usage: Usage) -> UsageTally {
        self.tallies[usage.position()]
    }
}

/// Accumulates every answered criterion into advantages and constraints per use case.
/// Unanswered criteria are listed as missing and contribute nothing.
pub(crate) fn score_record(record: &ParcelRecord) -> ScoreSheet {
    let values = record.criteria();
    let mut tallies = [UsageTally::default(); 7];
    let mut missing = Vec::new();

    for criterion in Criterion::ALL {
        let impacts = values.get(&criterion).and_then(lookup_impact);
        let Some(impacts) = impacts else {
            missing.push(criterion);
            continue;
        };

        let weight = criterion.weight();
        for (usage, impact) in impacts.iter() {
            tallies[usage.position()].add(impact.value() * weight);
        }
    }

    ScoreSheet { tallies, missing }
}
