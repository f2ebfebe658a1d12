use async_trait::async_trait;
use cinemap_models::{Genre, MediaKind, RawItem, ResultPage, WatchProviders};
use tracing::warn;

use crate::error::SourceError;
use crate::query::CatalogQuery;

/// A paginated movie/show catalog.
///
/// Every method is a single attempt: no retries happen at this layer.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    // Source metadata
    fn source_name(&self) -> &str;

    /// Fetch one page (1-based) of a list query
    async fn fetch_page(
        &self,
        kind: MediaKind,
        query: &CatalogQuery,
        page: u32,
    ) -> Result<ResultPage, SourceError>;

    /// Same as `fetch_page`, but failures collapse into the empty sentinel
    /// (`ResultPage::empty()`), which callers treat as "stop paginating"
    async fn fetch_page_or_empty(&self, kind: MediaKind, query: &CatalogQuery, page: u32) -> ResultPage {
        match self.fetch_page(kind, query, page).await {
            Ok(page) => page,
            Err(e) => {
                warn!("{} {} page {} failed: {}", self.source_name(), query, page, e);
                ResultPage::empty()
            }
        }
    }

    async fn fetch_genres(&self, kind: MediaKind) -> Result<Vec<Genre>, SourceError>;

    /// Full record for one item; `Ok(None)` when the id does not exist
    async fn fetch_details(&self, kind: MediaKind, id: u64) -> Result<Option<RawItem>, SourceError>;

    /// Streaming availability per region; `Ok(None)` when the id does not exist
    async fn fetch_watch_providers(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<Option<WatchProviders>, SourceError>;

    /// Cheap authenticated request to verify connectivity and credentials
    async fn test_connection(&self) -> Result<(), SourceError>;
}
