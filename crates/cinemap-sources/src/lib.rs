pub mod error;
pub mod factory;
pub mod query;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use factory::create_source;
pub use query::{CatalogQuery, SortOrder, TimeWindow, YearRange};
pub use tmdb::TmdbClient;
pub use traits::CatalogSource;
