//! In-memory `CatalogSource` for unit tests.

use async_trait::async_trait;
use cinemap_models::{Genre, MediaKind, Provider, RawItem, RegionProviders, ResultPage, WatchProviders};
use cinemap_sources::{CatalogQuery, CatalogSource, SourceError};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

type QueryKey = (MediaKind, CatalogQuery);

#[derive(Default)]
pub struct FakeSource {
    pages: Mutex<HashMap<QueryKey, Vec<(Vec<RawItem>, u32)>>>,
    failing_pages: Mutex<HashSet<(MediaKind, CatalogQuery, u32)>>,
    fail_everything: Mutex<bool>,
    held: Mutex<HashMap<QueryKey, Arc<Notify>>>,
    genres: Mutex<HashMap<MediaKind, Vec<Genre>>>,
    failing_genres: Mutex<bool>,
    details: Mutex<HashMap<(MediaKind, u64), RawItem>>,
    providers: Mutex<HashMap<(MediaKind, u64), WatchProviders>>,
    failing_providers: Mutex<HashSet<(MediaKind, u64)>>,
    requests: AtomicUsize,
    genre_requests: AtomicUsize,
    provider_requests: AtomicUsize,
    log: Mutex<Vec<(MediaKind, CatalogQuery, u32)>>,
    /// Signalled when a held request is waiting
    pub held_request_started: Notify,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages 1..=n of `query`; anything past the list answers with an empty page
    pub fn set_pages(&self, kind: MediaKind, query: CatalogQuery, pages: Vec<(Vec<RawItem>, u32)>) {
        self.pages.lock().unwrap().insert((kind, query), pages);
    }

    pub fn fail_page(&self, kind: MediaKind, query: CatalogQuery, page: u32) {
        self.failing_pages.lock().unwrap().insert((kind, query, page));
    }

    pub fn fail_all_pages(&self) {
        *self.fail_everything.lock().unwrap() = true;
    }

    /// Block requests for `query` until the returned handle is notified
    pub fn hold(&self, kind: MediaKind, query: CatalogQuery) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.held.lock().unwrap().insert((kind, query), Arc::clone(&notify));
        notify
    }

    pub fn set_genres(&self, kind: MediaKind, genres: Vec<(u32, &str)>) {
        let genres = genres
            .into_iter()
            .map(|(id, name)| Genre { id, name: name.to_string() })
            .collect();
        self.genres.lock().unwrap().insert(kind, genres);
    }

    pub fn fail_genres(&self, failing: bool) {
        *self.failing_genres.lock().unwrap() = failing;
    }

    pub fn set_details(&self, kind: MediaKind, item: RawItem) {
        self.details.lock().unwrap().insert((kind, item.id), item);
    }

    pub fn set_providers(&self, kind: MediaKind, id: u64, providers: WatchProviders) {
        self.providers.lock().unwrap().insert((kind, id), providers);
    }

    pub fn fail_providers(&self, kind: MediaKind, id: u64) {
        self.failing_providers.lock().unwrap().insert((kind, id));
    }

    /// Page requests made so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn genre_request_count(&self) -> usize {
        self.genre_requests.load(Ordering::SeqCst)
    }

    pub fn provider_request_count(&self) -> usize {
        self.provider_requests.load(Ordering::SeqCst)
    }

    /// Every page request in the order it was made
    pub fn requests(&self) -> Vec<(MediaKind, CatalogQuery, u32)> {
        self.log.lock().unwrap().clone()
    }

    fn failure(path: &str) -> SourceError {
        SourceError::Status {
            path: path.to_string(),
            status: 500,
            body: "fake failure".to_string(),
        }
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn fetch_page(&self, kind: MediaKind, query: &CatalogQuery, page: u32) -> Result<ResultPage, SourceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push((kind, query.clone(), page));

        let held = self.held.lock().unwrap().get(&(kind, query.clone())).cloned();
        if let Some(notify) = held {
            self.held_request_started.notify_one();
            notify.notified().await;
        }

        if *self.fail_everything.lock().unwrap()
            || self.failing_pages.lock().unwrap().contains(&(kind, query.clone(), page))
        {
            return Err(Self::failure(&query.to_string()));
        }

        let pages = self.pages.lock().unwrap();
        let result = pages
            .get(&(kind, query.clone()))
            .and_then(|pages| pages.get(page as usize - 1))
            .map(|(items, total_pages)| ResultPage::new(items.clone(), *total_pages))
            .unwrap_or_default();
        Ok(result)
    }

    async fn fetch_genres(&self, kind: MediaKind) -> Result<Vec<Genre>, SourceError> {
        self.genre_requests.fetch_add(1, Ordering::SeqCst);
        if *self.failing_genres.lock().unwrap() {
            return Err(Self::failure("/genre/list"));
        }
        Ok(self.genres.lock().unwrap().get(&kind).cloned().unwrap_or_default())
    }

    async fn fetch_details(&self, kind: MediaKind, id: u64) -> Result<Option<RawItem>, SourceError> {
        Ok(self.details.lock().unwrap().get(&(kind, id)).cloned())
    }

    async fn fetch_watch_providers(&self, kind: MediaKind, id: u64) -> Result<Option<WatchProviders>, SourceError> {
        self.provider_requests.fetch_add(1, Ordering::SeqCst);
        if self.failing_providers.lock().unwrap().contains(&(kind, id)) {
            return Err(Self::failure("/watch/providers"));
        }
        Ok(self.providers.lock().unwrap().get(&(kind, id)).cloned())
    }

    async fn test_connection(&self) -> Result<(), SourceError> {
        Ok(())
    }
}

pub fn raw_movie(id: u64, release_date: &str, vote_average: f64) -> RawItem {
    RawItem {
        id,
        title: Some(format!("Movie {}", id)),
        release_date: Some(release_date.to_string()),
        vote_average: Some(vote_average),
        vote_count: Some(100),
        ..RawItem::default()
    }
}

pub fn raw_show(id: u64, first_air_date: &str, vote_average: f64) -> RawItem {
    RawItem {
        id,
        name: Some(format!("Show {}", id)),
        first_air_date: Some(first_air_date.to_string()),
        vote_average: Some(vote_average),
        vote_count: Some(100),
        ..RawItem::default()
    }
}

/// One-region availability with the given subscription platforms
pub fn providers_in(region: &str, platforms: &[&str]) -> WatchProviders {
    let flatrate = platforms
        .iter()
        .enumerate()
        .map(|(i, name)| Provider {
            provider_id: i as u32 + 1,
            provider_name: name.to_string(),
            logo_path: None,
            display_priority: None,
        })
        .collect();
    let mut providers = WatchProviders::default();
    providers.results.insert(
        region.to_string(),
        RegionProviders {
            flatrate,
            ..RegionProviders::default()
        },
    );
    providers
}
