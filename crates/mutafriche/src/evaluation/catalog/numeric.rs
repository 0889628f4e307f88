use super::UsageImpacts;

/// Upper edge of a numeric bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Strictly below the threshold.
    Below(f64),
    /// At or below the threshold.
    AtMost(f64),
}

impl Bound {
    fn admits(self, value: f64) -> bool {
        match self {
            Bound::Below(threshold) => value < threshold,
            Bound::AtMost(threshold) => value <= threshold,
        }
    }

    pub fn threshold(self) -> f64 {
        match self {
            Bound::Below(threshold) | Bound::AtMost(threshold) => threshold,
        }
    }
}

/// Discrete range of a numeric criterion together with its impact table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBucket {
    pub label: &'static str,
    pub impacts: UsageImpacts,
}

/// Ordered thresholds for one numeric criterion; `beyond` catches everything above them.
#[derive(Debug)]
pub struct NumericRule {
    pub(crate) bounded: &'static [(Bound, NumericBucket)],
    pub(crate) beyond: NumericBucket,
}

impl NumericRule {
    /// First bucket whose bound admits the value, in ascending threshold order.
    pub fn bucket(&self, value: f64) -> NumericBucket {
        self.bounded
            .iter()
            .find(|(bound, _)| bound.admits(value))
            .map(|(_, bucket)| *bucket)
            .unwrap_or(self.beyond)
    }

    pub(crate) fn thresholds_ascending(&self) -> bool {
        self.bounded
            .windows(2)
            .all(|pair| pair[0].0.threshold() < pair[1].0.threshold())
    }
}
