use cinemap_models::{CatalogItem, DecadePolicy, MediaKind};
use cinemap_sources::{CatalogQuery, CatalogSource, SourceError};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::normalize::{dedupe_by_id, Normalizer};
use crate::pagination::{collect_pages, Cancelled, PagePlan};

/// Single-item and free-text lookups, normalized like aggregation results
pub struct CatalogLookup {
    source: Arc<dyn CatalogSource>,
    normalizer: Normalizer,
}

impl CatalogLookup {
    pub fn new(source: Arc<dyn CatalogSource>, image_base_url: &str, policy: DecadePolicy) -> Self {
        Self {
            source,
            normalizer: Normalizer::new(image_base_url, policy),
        }
    }

    /// Full record for `id`, `None` when it does not exist
    pub async fn details(&self, kind: MediaKind, id: u64) -> Result<Option<CatalogItem>, SourceError> {
        let raw = self.source.fetch_details(kind, id).await?;
        if raw.is_none() {
            debug!("{} {} not found", kind, id);
        }
        Ok(raw.map(|r| self.normalizer.normalize(r, kind)))
    }

    /// Up to `pages` pages of search results, first occurrence of each id kept
    pub async fn search(
        &self,
        kind: MediaKind,
        query: &str,
        pages: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<CatalogItem>, Cancelled> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let plan = PagePlan::new(pages, Duration::ZERO);
        let report = collect_pages(self.source.as_ref(), kind, &CatalogQuery::search(query), plan, cancel).await?;
        debug!("Search '{}' returned {} {}", query, report.items.len(), kind.plural());

        Ok(self.normalizer.normalize_all(dedupe_by_id(report.items), kind))
    }
}
