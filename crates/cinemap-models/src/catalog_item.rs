use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decade::Decade;
use crate::media::MediaKind;

/// Identity of a catalog item. Ids are only unique within one media kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogKey {
    pub kind: MediaKind,
    pub id: u64,
}

impl CatalogKey {
    pub fn new(kind: MediaKind, id: u64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// A normalized movie or show.
///
/// Image references are absolute URLs, `year` and `decade` are derived from
/// the source date field at normalization time, and `rating` is the vote
/// average formatted to one decimal place (or "N/A").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub decade: Option<Decade>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub backdrop_url: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub origin_country: Vec<String>,
}

impl CatalogItem {
    pub fn key(&self) -> CatalogKey {
        CatalogKey::new(self.kind, self.id)
    }

    /// Sort value: vote average, 0 when absent
    pub fn rating_value(&self) -> f64 {
        self.vote_average.unwrap_or(0.0)
    }

    /// "Title (1994)" or just the title when undated
    pub fn display_title(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }

    pub fn has_any_genre(&self, genre_ids: &std::collections::HashSet<u32>) -> bool {
        self.genre_ids.iter().any(|id| genre_ids.contains(id))
    }
}
