pub mod catalog_item;
pub mod country;
pub mod decade;
pub mod genre;
pub mod media;
pub mod raw;
pub mod streaming;
pub mod watchlist;

pub use catalog_item::{CatalogItem, CatalogKey};
pub use country::{Country, COUNTRIES};
pub use decade::{Decade, DecadeBuckets, DecadePolicy};
pub use genre::{Genre, GenreList};
pub use media::MediaKind;
pub use raw::{RawItem, ResultPage};
pub use streaming::{Provider, RegionProviders, StreamingPick, WatchProviders};
pub use watchlist::WatchlistEntry;
