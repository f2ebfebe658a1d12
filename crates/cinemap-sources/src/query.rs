use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort key for country-of-origin discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// `popularity.desc`, low vote-count floor
    Popularity,
    /// `vote_average.desc`, higher vote-count floor so ratings are meaningful
    Rating,
}

/// Inclusive range of release years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeWindow {
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// Every paginated list query the catalog supports. Each one maps to a
/// request path and parameter set per media kind; all share the same page
/// shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogQuery {
    ByCountry { country: String, sort: SortOrder },
    ByCountryAndYears { country: String, range: YearRange },
    ByLanguage { language: String },
    TopRated,
    Trending { window: TimeWindow },
    Search { query: String },
}

impl CatalogQuery {
    pub fn by_country(country: &str, sort: SortOrder) -> Self {
        CatalogQuery::ByCountry {
            country: country.to_string(),
            sort,
        }
    }

    pub fn by_country_and_years(country: &str, range: YearRange) -> Self {
        CatalogQuery::ByCountryAndYears {
            country: country.to_string(),
            range,
        }
    }

    pub fn by_language(language: &str) -> Self {
        CatalogQuery::ByLanguage {
            language: language.to_string(),
        }
    }

    pub fn search(query: &str) -> Self {
        CatalogQuery::Search {
            query: query.to_string(),
        }
    }
}

impl fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogQuery::ByCountry { country, sort } => write!(f, "country={} sort={:?}", country, sort),
            CatalogQuery::ByCountryAndYears { country, range } => {
                write!(f, "country={} years={}", country, range)
            }
            CatalogQuery::ByLanguage { language } => write!(f, "language={}", language),
            CatalogQuery::TopRated => write!(f, "top_rated"),
            CatalogQuery::Trending { window } => write!(f, "trending/{}", window.as_str()),
            CatalogQuery::Search { query } => write!(f, "search=\"{}\"", query),
        }
    }
}
