pub mod aggregator;
pub mod cache;
pub mod genre_filter;
pub mod lookup;
pub mod normalize;
pub mod outcome;
pub mod pagination;
pub mod selection;
pub mod streaming;
pub mod watchlist;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::Aggregator;
pub use cache::SessionCache;
pub use genre_filter::{GenreFilter, GenreMap};
pub use lookup::CatalogLookup;
pub use normalize::Normalizer;
pub use outcome::AggregationOutcome;
pub use pagination::{collect_pages, Cancelled, PagePlan, PhaseReport};
pub use selection::{SelectionTracker, Ticket};
pub use streaming::{filter_picks, StreamingError, StreamingService};
pub use watchlist::{WatchlistError, WatchlistStore};
