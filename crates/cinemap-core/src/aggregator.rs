use chrono::Datelike;
use cinemap_config::AggregationConfig;
use cinemap_models::{Country, DecadeBuckets, DecadePolicy, MediaKind};
use cinemap_sources::{CatalogQuery, CatalogSource, SortOrder, YearRange};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::SessionCache;
use crate::normalize::{dedupe_by_id, Normalizer};
use crate::outcome::AggregationOutcome;
use crate::pagination::{collect_pages, Cancelled, PagePlan, PhaseReport};
use crate::selection::{SelectionTracker, Ticket};

#[cfg(test)]
mod tests;

/// Start years of the per-decade discovery phases
const YEAR_RANGE_STARTS: [i32; 5] = [1980, 1990, 2000, 2010, 2020];

/// Builds the decade-bucketed catalog of one country.
///
/// Results are cached for the aggregator's lifetime under
/// `"{movies|shows}:country_{CODE}"`.
pub struct Aggregator {
    source: Arc<dyn CatalogSource>,
    config: AggregationConfig,
    normalizer: Normalizer,
    cache: SessionCache<DecadeBuckets>,
    selection: SelectionTracker,
}

impl Aggregator {
    pub fn new(source: Arc<dyn CatalogSource>, config: &AggregationConfig, image_base_url: &str) -> Self {
        Self {
            source,
            config: config.clone(),
            normalizer: Normalizer::new(image_base_url, config.decade_policy),
            cache: SessionCache::new("aggregation"),
            selection: SelectionTracker::new(),
        }
    }

    pub fn cache_key(kind: MediaKind, country_code: &str) -> String {
        format!("{}:country_{}", kind.plural(), country_code)
    }

    pub fn cache(&self) -> &SessionCache<DecadeBuckets> {
        &self.cache
    }

    pub fn policy(&self) -> DecadePolicy {
        self.normalizer.policy()
    }

    pub fn source(&self) -> &Arc<dyn CatalogSource> {
        &self.source
    }

    /// Year ranges for the per-decade phases, the last one ending at
    /// `current_year`
    pub fn year_ranges(current_year: i32) -> Vec<YearRange> {
        YEAR_RANGE_STARTS
            .iter()
            .map(|&start| {
                let end = if start == 2020 { current_year.max(start) } else { start + 9 };
                YearRange::new(start, end)
            })
            .collect()
    }

    pub async fn aggregate_country(&self, kind: MediaKind, country: &str) -> AggregationOutcome {
        self.aggregate(kind, country, None).await
    }

    /// Like `aggregate_country`, but also stops when `cancel` fires
    pub async fn aggregate_country_with(
        &self,
        kind: MediaKind,
        country: &str,
        cancel: &CancellationToken,
    ) -> AggregationOutcome {
        self.aggregate(kind, country, Some(cancel)).await
    }

    async fn aggregate(&self, kind: MediaKind, country: &str, cancel: Option<&CancellationToken>) -> AggregationOutcome {
        let Some(country) = Country::lookup(country) else {
            warn!("Unknown country: {}", country);
            return AggregationOutcome::UnknownCountry(country.to_string());
        };

        let key = Self::cache_key(kind, country.code);
        let ticket = self.selection.begin(&key, cancel);

        if let Some(cached) = self.cache.get(&key) {
            return AggregationOutcome::from_buckets(cached);
        }

        info!("Aggregating {} for {} ({})", kind.plural(), country.name, country.code);
        let started = Instant::now();

        let report = match self.run_phases(kind, country, &ticket.token).await {
            Ok(report) => report,
            Err(Cancelled) => {
                info!("Aggregation for {} cancelled", key);
                return AggregationOutcome::Superseded;
            }
        };

        if !report.any_success() && report.failures > 0 {
            warn!(
                "All {} requests for {} failed, not caching",
                report.failures, key
            );
            let failed = AggregationOutcome::Failed {
                buckets: Arc::new(DecadeBuckets::default()),
                reason: format!("all {} requests failed", report.failures),
            };
            return self.finish(&ticket, failed);
        }

        let fetched = report.items.len();
        let unique = dedupe_by_id(report.items);
        let unique_count = unique.len();
        let items = self.normalizer.normalize_all(unique, kind);
        let buckets = DecadeBuckets::organize(self.policy(), items);

        info!(
            "{}: {} fetched, {} unique, {} bucketed ({} failed requests) in {:?}",
            key,
            fetched,
            unique_count,
            buckets.total_items(),
            report.failures,
            started.elapsed()
        );

        let buckets = self.cache.set(key.as_str(), buckets);
        self.finish(&ticket, AggregationOutcome::from_buckets(buckets))
    }

    fn finish(&self, ticket: &Ticket, outcome: AggregationOutcome) -> AggregationOutcome {
        if self.selection.is_current(ticket) {
            outcome
        } else {
            debug!("{} finished after a newer selection began", ticket.key);
            AggregationOutcome::Superseded
        }
    }

    async fn run_phases(
        &self,
        kind: MediaKind,
        country: &Country,
        cancel: &CancellationToken,
    ) -> Result<PhaseReport, Cancelled> {
        let source = self.source.as_ref();
        let mut report = PhaseReport::default();

        let popular = CatalogQuery::by_country(country.code, SortOrder::Popularity);
        let plan = PagePlan::new(self.config.popular_pages, self.config.page_delay());
        report.merge(collect_pages(source, kind, &popular, plan, cancel).await?);
        debug!("After popularity phase: {} items", report.items.len());

        let rated = CatalogQuery::by_country(country.code, SortOrder::Rating);
        let plan = PagePlan::new(self.config.top_rated_pages, self.config.page_delay());
        report.merge(collect_pages(source, kind, &rated, plan, cancel).await?);
        debug!("After rating phase: {} items", report.items.len());

        let plan = PagePlan::new(self.config.year_range_pages, self.config.year_range_delay());
        for range in Self::year_ranges(chrono::Utc::now().year()) {
            let query = CatalogQuery::by_country_and_years(country.code, range);
            report.merge(collect_pages(source, kind, &query, plan, cancel).await?);
        }
        debug!("After year-range phases: {} items", report.items.len());

        if report.items.is_empty() {
            if let Some(language) = country.fallback_language {
                info!(
                    "No {} found by origin for {}, trying original language '{}'",
                    kind.plural(),
                    country.name,
                    language
                );
                let query = CatalogQuery::by_language(language);
                let plan = PagePlan::new(self.config.language_pages, self.config.page_delay());
                report.merge(collect_pages(source, kind, &query, plan, cancel).await?);
            }
        }

        Ok(report)
    }
}
