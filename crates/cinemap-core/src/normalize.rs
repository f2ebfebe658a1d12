// Turning raw API records into catalog items

use cinemap_models::{CatalogItem, DecadePolicy, MediaKind, RawItem};
use std::collections::HashSet;

/// Converts `RawItem`s into `CatalogItem`s for one media kind.
#[derive(Debug, Clone)]
pub struct Normalizer {
    image_base_url: String,
    policy: DecadePolicy,
}

impl Normalizer {
    pub fn new(image_base_url: &str, policy: DecadePolicy) -> Self {
        Self {
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
            policy,
        }
    }

    pub fn policy(&self) -> DecadePolicy {
        self.policy
    }

    pub fn normalize(&self, raw: RawItem, kind: MediaKind) -> CatalogItem {
        let (title, original_title, release_date) = match kind {
            MediaKind::Movie => (
                raw.title.or(raw.name),
                raw.original_title.or(raw.original_name),
                raw.release_date,
            ),
            MediaKind::Show => (
                raw.name.or(raw.title),
                raw.original_name.or(raw.original_title),
                raw.first_air_date,
            ),
        };

        let year = release_date.as_deref().and_then(year_from_date);
        let genre_ids = match (raw.genre_ids, raw.genres) {
            (Some(ids), _) => ids,
            (None, Some(genres)) => genres.into_iter().map(|g| g.id).collect(),
            (None, None) => Vec::new(),
        };

        CatalogItem {
            id: raw.id,
            kind,
            title: title.unwrap_or_else(|| "Untitled".to_string()),
            original_title,
            overview: raw.overview.filter(|o| !o.is_empty()),
            release_date: release_date.filter(|d| !d.is_empty()),
            year,
            decade: self.policy.classify(year),
            vote_average: raw.vote_average,
            rating: rating_label(raw.vote_average),
            vote_count: raw.vote_count.unwrap_or(0),
            popularity: raw.popularity,
            poster_url: self.image_url(raw.poster_path.as_deref()),
            backdrop_url: self.image_url(raw.backdrop_path.as_deref()),
            genre_ids,
            original_language: raw.original_language,
            origin_country: raw.origin_country.unwrap_or_default(),
        }
    }

    pub fn normalize_all(&self, raw: Vec<RawItem>, kind: MediaKind) -> Vec<CatalogItem> {
        raw.into_iter().map(|r| self.normalize(r, kind)).collect()
    }

    fn image_url(&self, path: Option<&str>) -> Option<String> {
        match path {
            Some(p) if !p.is_empty() => {
                if p.starts_with('/') {
                    Some(format!("{}{}", self.image_base_url, p))
                } else {
                    Some(format!("{}/{}", self.image_base_url, p))
                }
            }
            _ => None,
        }
    }
}

/// Year from the first `-` separated component of an API date ("1994-09-23")
pub fn year_from_date(date: &str) -> Option<i32> {
    date.split('-').next()?.trim().parse().ok()
}

/// One decimal place, or "N/A" when there is no rating
pub fn rating_label(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(v) if v > 0.0 => format!("{:.1}", v),
        _ => "N/A".to_string(),
    }
}

/// Drop repeated ids, keeping the first occurrence and the original order
pub fn dedupe_by_id(items: Vec<RawItem>) -> Vec<RawItem> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.id)).collect()
}
