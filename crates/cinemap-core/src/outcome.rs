use cinemap_models::DecadeBuckets;
use std::sync::Arc;

/// Result of one country aggregation.
///
/// Every variant other than `Ready` and `NoData` maps to the empty decade
/// mapping through `into_buckets`.
#[derive(Debug, Clone)]
pub enum AggregationOutcome {
    /// At least one item landed in a bucket
    Ready(Arc<DecadeBuckets>),
    /// The upstream answered but nothing survived bucketing
    NoData(Arc<DecadeBuckets>),
    /// Every request failed; nothing was cached
    Failed { buckets: Arc<DecadeBuckets>, reason: String },
    /// The name or code is not in the country vocabulary
    UnknownCountry(String),
    /// A newer selection replaced this one before it could be shown
    Superseded,
}

impl AggregationOutcome {
    pub(crate) fn from_buckets(buckets: Arc<DecadeBuckets>) -> Self {
        if buckets.is_empty() {
            AggregationOutcome::NoData(buckets)
        } else {
            AggregationOutcome::Ready(buckets)
        }
    }

    /// Buckets to display; `None` for outcomes that carry no mapping
    pub fn buckets(&self) -> Option<&DecadeBuckets> {
        match self {
            AggregationOutcome::Ready(b) | AggregationOutcome::NoData(b) => Some(b),
            AggregationOutcome::Failed { buckets, .. } => Some(buckets),
            AggregationOutcome::UnknownCountry(_) | AggregationOutcome::Superseded => None,
        }
    }

    pub fn into_buckets(self) -> Arc<DecadeBuckets> {
        match self {
            AggregationOutcome::Ready(b) | AggregationOutcome::NoData(b) => b,
            AggregationOutcome::Failed { buckets, .. } => buckets,
            AggregationOutcome::UnknownCountry(_) | AggregationOutcome::Superseded => {
                Arc::new(DecadeBuckets::default())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, AggregationOutcome::Ready(_))
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, AggregationOutcome::Superseded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AggregationOutcome::Failed { .. })
    }

    /// Short description for logs and status lines
    pub fn summary(&self) -> String {
        match self {
            AggregationOutcome::Ready(b) => format!("{} items", b.total_items()),
            AggregationOutcome::NoData(_) => "no data".to_string(),
            AggregationOutcome::Failed { reason, .. } => format!("failed: {}", reason),
            AggregationOutcome::UnknownCountry(name) => format!("unknown country '{}'", name),
            AggregationOutcome::Superseded => "superseded".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinemap_models::DecadePolicy;

    #[test]
    fn test_non_ready_outcomes_yield_empty_mapping() {
        assert!(AggregationOutcome::Superseded.into_buckets().labels().is_empty());
        assert!(AggregationOutcome::UnknownCountry("Atlantis".to_string())
            .into_buckets()
            .labels()
            .is_empty());

        let empty = Arc::new(DecadeBuckets::new(DecadePolicy::Cutoff));
        let outcome = AggregationOutcome::from_buckets(empty);
        assert!(matches!(outcome, AggregationOutcome::NoData(_)));
        assert_eq!(outcome.summary(), "no data");
    }
}
