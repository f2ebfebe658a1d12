//! Request shapes for the TMDb v3 API: which path and query parameters each
//! catalog operation uses.

use cinemap_models::MediaKind;

use crate::query::{CatalogQuery, SortOrder};

/// Request path plus query parameters (without the leading base URL)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl Endpoint {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    #[cfg(test)]
    fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Endpoint for one page of a list query
pub fn list_endpoint(kind: MediaKind, query: &CatalogQuery, page: u32) -> Endpoint {
    let segment = kind.api_segment();
    let discover = format!("/discover/{}", segment);

    let endpoint = match query {
        CatalogQuery::ByCountry { country, sort } => {
            let base = Endpoint::new(discover).param("with_origin_country", country);
            match sort {
                SortOrder::Popularity => base
                    .param("sort_by", "popularity.desc")
                    .param("vote_count.gte", 5)
                    .param("include_adult", false),
                SortOrder::Rating => base
                    .param("sort_by", "vote_average.desc")
                    .param("vote_count.gte", 100),
            }
        }
        CatalogQuery::ByCountryAndYears { country, range } => {
            let field = kind.date_field();
            Endpoint::new(discover)
                .param("with_origin_country", country)
                .param(&format!("{}.gte", field), format!("{}-01-01", range.start))
                .param(&format!("{}.lte", field), format!("{}-12-31", range.end))
                .param("sort_by", "popularity.desc")
                .param("vote_count.gte", 5)
        }
        CatalogQuery::ByLanguage { language } => Endpoint::new(discover)
            .param("with_original_language", language)
            .param("sort_by", "popularity.desc")
            .param("vote_count.gte", 10),
        CatalogQuery::TopRated => Endpoint::new(format!("/{}/top_rated", segment)),
        CatalogQuery::Trending { window } => {
            Endpoint::new(format!("/trending/{}/{}", segment, window.as_str()))
        }
        CatalogQuery::Search { query } => Endpoint::new(format!("/search/{}", segment))
            .param("query", query)
            .param("include_adult", false),
    };

    endpoint.param("page", page)
}

pub fn genre_list_endpoint(kind: MediaKind) -> Endpoint {
    Endpoint::new(format!("/genre/{}/list", kind.api_segment()))
}

pub fn details_endpoint(kind: MediaKind, id: u64) -> Endpoint {
    Endpoint::new(format!("/{}/{}", kind.api_segment(), id))
}

pub fn watch_providers_endpoint(kind: MediaKind, id: u64) -> Endpoint {
    Endpoint::new(format!("/{}/{}/watch/providers", kind.api_segment(), id))
}

pub fn configuration_endpoint() -> Endpoint {
    Endpoint::new("/configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{TimeWindow, YearRange};

    #[test]
    fn test_country_popularity_params() {
        let ep = list_endpoint(MediaKind::Movie, &CatalogQuery::by_country("JP", SortOrder::Popularity), 2);
        assert_eq!(ep.path, "/discover/movie");
        assert_eq!(ep.get("with_origin_country"), Some("JP"));
        assert_eq!(ep.get("sort_by"), Some("popularity.desc"));
        assert_eq!(ep.get("vote_count.gte"), Some("5"));
        assert_eq!(ep.get("include_adult"), Some("false"));
        assert_eq!(ep.get("page"), Some("2"));
    }

    #[test]
    fn test_country_rating_params_for_shows() {
        let ep = list_endpoint(MediaKind::Show, &CatalogQuery::by_country("KR", SortOrder::Rating), 1);
        assert_eq!(ep.path, "/discover/tv");
        assert_eq!(ep.get("sort_by"), Some("vote_average.desc"));
        assert_eq!(ep.get("vote_count.gte"), Some("100"));
    }

    #[test]
    fn test_year_range_uses_kind_date_field() {
        let range = YearRange::new(1990, 1999);
        let movie = list_endpoint(MediaKind::Movie, &CatalogQuery::by_country_and_years("FR", range), 1);
        assert_eq!(movie.get("primary_release_date.gte"), Some("1990-01-01"));
        assert_eq!(movie.get("primary_release_date.lte"), Some("1999-12-31"));

        let show = list_endpoint(MediaKind::Show, &CatalogQuery::by_country_and_years("FR", range), 3);
        assert_eq!(show.get("first_air_date.gte"), Some("1990-01-01"));
        assert_eq!(show.get("first_air_date.lte"), Some("1999-12-31"));
        assert_eq!(show.get("page"), Some("3"));
    }

    #[test]
    fn test_global_endpoints() {
        assert_eq!(list_endpoint(MediaKind::Show, &CatalogQuery::TopRated, 1).path, "/tv/top_rated");
        assert_eq!(
            list_endpoint(MediaKind::Movie, &CatalogQuery::Trending { window: TimeWindow::Week }, 1).path,
            "/trending/movie/week"
        );
        assert_eq!(genre_list_endpoint(MediaKind::Show).path, "/genre/tv/list");
        assert_eq!(details_endpoint(MediaKind::Movie, 550).path, "/movie/550");
        assert_eq!(watch_providers_endpoint(MediaKind::Show, 1399).path, "/tv/1399/watch/providers");
    }

    #[test]
    fn test_language_and_search() {
        let ep = list_endpoint(MediaKind::Movie, &CatalogQuery::by_language("ko"), 1);
        assert_eq!(ep.get("with_original_language"), Some("ko"));
        assert_eq!(ep.get("vote_count.gte"), Some("10"));

        let ep = list_endpoint(MediaKind::Movie, &CatalogQuery::search("spirited away"), 1);
        assert_eq!(ep.path, "/search/movie");
        assert_eq!(ep.get("query"), Some("spirited away"));
    }
}
