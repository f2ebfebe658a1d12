use serde::{Deserialize, Serialize};
use std::fmt;

/// The two catalogs the upstream API exposes.
///
/// Movies and shows normalize to the same `CatalogItem`; they only differ in
/// which date and title fields the raw record carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Movie,
    Show,
}

impl MediaKind {
    /// Path segment used by the API (`/discover/movie`, `/discover/tv`)
    pub fn api_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "tv",
        }
    }

    /// Plural label used in cache keys and user-facing output
    pub fn plural(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movies",
            MediaKind::Show => "shows",
        }
    }

    /// Query parameter prefix for date-range filters on discovery endpoints
    pub fn date_field(&self) -> &'static str {
        match self {
            MediaKind::Movie => "primary_release_date",
            MediaKind::Show => "first_air_date",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Show => write!(f, "show"),
        }
    }
}
