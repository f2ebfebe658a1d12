use cinemap_models::{CatalogItem, DecadeBuckets, Genre, MediaKind};
use cinemap_sources::{CatalogSource, SourceError};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Genre names and ids for one media kind. Names match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct GenreMap {
    genres: Vec<Genre>,
    by_name: HashMap<String, u32>,
}

impl GenreMap {
    pub fn from_genres(genres: Vec<Genre>) -> Self {
        let by_name = genres
            .iter()
            .map(|g| (g.name.to_lowercase(), g.id))
            .collect();
        Self { genres, by_name }
    }

    pub fn id_for(&self, name: &str) -> Option<u32> {
        self.by_name.get(&name.trim().to_lowercase()).copied()
    }

    pub fn name_for(&self, id: u32) -> Option<&str> {
        self.genres.iter().find(|g| g.id == id).map(|g| g.name.as_str())
    }

    /// Ids for every name that is known; unknown names are skipped
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> HashSet<u32> {
        names.iter().filter_map(|n| self.id_for(n.as_ref())).collect()
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}

/// Narrows decade buckets to items of the selected genres.
///
/// The genre list of each media kind is fetched at most once per filter;
/// failed or empty fetches are retried on the next call.
pub struct GenreFilter {
    source: Arc<dyn CatalogSource>,
    movies: OnceCell<Arc<GenreMap>>,
    shows: OnceCell<Arc<GenreMap>>,
}

impl GenreFilter {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            movies: OnceCell::new(),
            shows: OnceCell::new(),
        }
    }

    fn cell(&self, kind: MediaKind) -> &OnceCell<Arc<GenreMap>> {
        match kind {
            MediaKind::Movie => &self.movies,
            MediaKind::Show => &self.shows,
        }
    }

    /// The genre map for `kind`, or `None` if it could not be loaded
    pub async fn genre_map(&self, kind: MediaKind) -> Option<Arc<GenreMap>> {
        let loaded = self
            .cell(kind)
            .get_or_try_init(|| async {
                let genres = self.source.fetch_genres(kind).await?;
                if genres.is_empty() {
                    return Err(SourceError::Decode {
                        path: format!("/genre/{}/list", kind.api_segment()),
                        message: "empty genre list".to_string(),
                    });
                }
                debug!("Loaded {} {} genres", genres.len(), kind);
                Ok::<_, SourceError>(Arc::new(GenreMap::from_genres(genres)))
            })
            .await;

        match loaded {
            Ok(map) => Some(Arc::clone(map)),
            Err(e) => {
                warn!("Could not load {} genres: {}", kind, e);
                None
            }
        }
    }

    /// Genres that can be selected for `kind`; empty when unavailable
    pub async fn available_genres(&self, kind: MediaKind) -> Vec<Genre> {
        self.genre_map(kind)
            .await
            .map(|m| m.genres().to_vec())
            .unwrap_or_default()
    }

    /// Ids the selected names resolve to (empty when none are known)
    pub async fn resolve(&self, kind: MediaKind, selected: &[String]) -> HashSet<u32> {
        if selected.is_empty() {
            return HashSet::new();
        }
        match self.genre_map(kind).await {
            Some(map) => map.resolve(selected),
            None => HashSet::new(),
        }
    }

    /// Keep only items whose genres intersect the selection.
    ///
    /// Returns the input unchanged when nothing is selected, when no
    /// selected name is known, or when the genre list is unavailable.
    pub async fn filter(&self, kind: MediaKind, buckets: &DecadeBuckets, selected: &[String]) -> DecadeBuckets {
        if selected.is_empty() {
            return buckets.clone();
        }

        let ids = self.resolve(kind, selected).await;
        if ids.is_empty() {
            debug!("No known genre among {:?}, not filtering", selected);
            return buckets.clone();
        }

        apply(buckets, &ids)
    }
}

/// Items with at least one of `genre_ids`; an empty id set keeps everything
pub fn apply(buckets: &DecadeBuckets, genre_ids: &HashSet<u32>) -> DecadeBuckets {
    if genre_ids.is_empty() {
        return buckets.clone();
    }
    buckets.filtered(|item| matches_any(item, genre_ids))
}

pub fn matches_any(item: &CatalogItem, genre_ids: &HashSet<u32>) -> bool {
    !item.genre_ids.is_empty() && item.has_any_genre(genre_ids)
}
