use cinemap_config::StreamingConfig;
use cinemap_models::{CatalogItem, DecadePolicy, MediaKind, StreamingPick};
use cinemap_sources::{CatalogQuery, CatalogSource, TimeWindow};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::SessionCache;
use crate::genre_filter::matches_any;
use crate::normalize::{dedupe_by_id, Normalizer};
use crate::pagination::{collect_pages, Cancelled, PagePlan, PhaseReport};

#[derive(Debug, Error)]
pub enum StreamingError {
    #[error("request cancelled")]
    Cancelled,
    #[error("all {0} catalog requests failed")]
    Unavailable(u32),
}

impl From<Cancelled> for StreamingError {
    fn from(_: Cancelled) -> Self {
        StreamingError::Cancelled
    }
}

/// Globally top-rated and trending titles with their streaming platforms.
pub struct StreamingService {
    source: Arc<dyn CatalogSource>,
    config: StreamingConfig,
    normalizer: Normalizer,
    cache: SessionCache<Vec<StreamingPick>>,
}

impl StreamingService {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        config: &StreamingConfig,
        image_base_url: &str,
        policy: DecadePolicy,
    ) -> Self {
        Self {
            source,
            config: config.clone(),
            normalizer: Normalizer::new(image_base_url, policy),
            cache: SessionCache::new("streaming"),
        }
    }

    pub fn cache_key(kind: MediaKind) -> String {
        format!("best_{}_global", kind.plural())
    }

    pub fn cache(&self) -> &SessionCache<Vec<StreamingPick>> {
        &self.cache
    }

    pub fn preferred_regions(&self) -> &[String] {
        &self.config.preferred_regions
    }

    pub async fn best_globally(
        &self,
        kind: MediaKind,
        cancel: &CancellationToken,
    ) -> Result<Arc<Vec<StreamingPick>>, StreamingError> {
        let key = Self::cache_key(kind);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        info!("Fetching best {} globally", kind.plural());
        let source = self.source.as_ref();
        let plan = PagePlan::new(0, self.config.page_delay());
        let mut report = PhaseReport::default();

        let top_rated = PagePlan { max_pages: self.config.top_rated_pages, ..plan };
        report.merge(collect_pages(source, kind, &CatalogQuery::TopRated, top_rated, cancel).await?);

        let trending = PagePlan { max_pages: self.config.trending_pages, ..plan };
        let query = CatalogQuery::Trending { window: TimeWindow::Week };
        report.merge(collect_pages(source, kind, &query, trending, cancel).await?);

        if !report.any_success() && report.failures > 0 {
            warn!("Could not fetch any {} for streaming picks", kind.plural());
            return Err(StreamingError::Unavailable(report.failures));
        }

        let items = self.normalizer.normalize_all(dedupe_by_id(report.items), kind);
        debug!("Looking up streaming availability for {} {}", items.len(), kind.plural());

        let lookups = items.into_iter().map(|item| self.with_providers(kind, item));
        let mut picks = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(StreamingError::Cancelled),
            picks = join_all(lookups) => picks,
        };
        picks.sort_by(|a, b| b.item.rating_value().total_cmp(&a.item.rating_value()));

        let with_info = picks.iter().filter(|p| p.providers.is_some()).count();
        info!("{} best {}: {} with streaming info", picks.len(), kind.plural(), with_info);

        Ok(self.cache.set(key, picks))
    }

    async fn with_providers(&self, kind: MediaKind, item: CatalogItem) -> StreamingPick {
        let providers = match self.source.fetch_watch_providers(kind, item.id).await {
            Ok(providers) => providers,
            Err(e) => {
                debug!("No streaming info for {}: {}", item.key(), e);
                None
            }
        };
        StreamingPick { item, providers }
    }
}

/// Narrow picks to a platform (case-insensitive substring of a provider
/// name in the chosen region) and to any of the given genres.
pub fn filter_picks(
    picks: &[StreamingPick],
    platform: Option<&str>,
    genre_ids: &HashSet<u32>,
    preferred_regions: &[String],
) -> Vec<StreamingPick> {
    let platform = platform.map(|p| p.trim().to_lowercase()).filter(|p| !p.is_empty());

    picks
        .iter()
        .filter(|pick| {
            let platform_ok = match platform {
                Some(ref wanted) => pick
                    .platforms(preferred_regions)
                    .iter()
                    .any(|name| name.to_lowercase().contains(wanted.as_str())),
                None => true,
            };
            platform_ok && (genre_ids.is_empty() || matches_any(&pick.item, genre_ids))
        })
        .cloned()
        .collect()
}
