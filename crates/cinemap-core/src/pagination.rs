use cinemap_models::{MediaKind, RawItem};
use cinemap_sources::{CatalogQuery, CatalogSource};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Page budget and pacing for one paginated query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub max_pages: u32,
    /// Pause between successive page requests
    pub delay: Duration,
}

impl PagePlan {
    pub fn new(max_pages: u32, delay: Duration) -> Self {
        Self { max_pages, delay }
    }
}

/// Everything one paginated query produced
#[derive(Debug, Default)]
pub struct PhaseReport {
    pub items: Vec<RawItem>,
    /// Pages that came back successfully (including empty ones)
    pub pages_fetched: u32,
    /// Requests that failed; a failure ends the phase
    pub failures: u32,
}

impl PhaseReport {
    pub fn merge(&mut self, other: PhaseReport) {
        self.items.extend(other.items);
        self.pages_fetched += other.pages_fetched;
        self.failures += other.failures;
    }

    /// True if at least one request reached the upstream and got an answer
    pub fn any_success(&self) -> bool {
        self.pages_fetched > 0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("request cancelled")]
pub struct Cancelled;

/// Fetch pages 1..=max_pages of `query` in sequence.
///
/// Stops early when a page has no items, when the reported total page count
/// is reached, or when a request fails (treated like the empty sentinel).
/// The token is checked before each request and interrupts both in-flight
/// requests and the delay between pages.
pub async fn collect_pages(
    source: &dyn CatalogSource,
    kind: MediaKind,
    query: &CatalogQuery,
    plan: PagePlan,
    cancel: &CancellationToken,
) -> Result<PhaseReport, Cancelled> {
    let mut report = PhaseReport::default();

    for page in 1..=plan.max_pages {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Cancelled),
            result = source.fetch_page(kind, query, page) => result,
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!("{} {} page {} failed ({}): {}", kind.plural(), query, page, e.category(), e);
                report.failures += 1;
                break;
            }
        };

        report.pages_fetched += 1;

        if response.items.is_empty() {
            debug!("{} {} page {} empty, stopping", kind.plural(), query, page);
            break;
        }
        report.items.extend(response.items);

        if page >= response.total_pages || page == plan.max_pages {
            break;
        }

        if !plan.delay.is_zero() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Cancelled),
                _ = tokio::time::sleep(plan.delay) => {}
            }
        }
    }

    Ok(report)
}
