use serde::{Deserialize, Serialize};

use crate::genre::Genre;

/// A single record as returned by discovery, search, trending and details
/// endpoints. Movies fill `title`/`release_date`, shows fill
/// `name`/`first_air_date`; everything else is shared.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawItem {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Present on list endpoints
    #[serde(default)]
    pub genre_ids: Option<Vec<u32>>,
    /// Present on the details endpoint instead of `genre_ids`
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub origin_country: Option<Vec<String>>,
}

/// One page of results.
///
/// `ResultPage::empty()` doubles as the "stop paginating" sentinel: no items
/// and zero total pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResultPage {
    #[serde(rename = "results", default)]
    pub items: Vec<RawItem>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: Option<u64>,
}

impl ResultPage {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(items: Vec<RawItem>, total_pages: u32) -> Self {
        Self {
            items,
            total_pages,
            total_results: None,
        }
    }
}
