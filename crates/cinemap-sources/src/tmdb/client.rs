use crate::error::SourceError;
use crate::query::CatalogQuery;
use crate::tmdb::api::{self, Endpoint};
use crate::traits::CatalogSource;
use async_trait::async_trait;
use cinemap_config::TmdbConfig;
use cinemap_models::{Genre, GenreList, MediaKind, RawItem, ResultPage, WatchProviders};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub fn create_tmdb_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(concat!("cinemap/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Bearer-token client for the TMDb v3 API
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    access_token: String,
    language: Option<String>,
}

impl TmdbClient {
    pub fn new(access_token: String, config: &TmdbConfig) -> Self {
        Self {
            client: Arc::new(create_tmdb_client(config.timeout())),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token,
            language: config.language.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an endpoint and decode its JSON body.
    ///
    /// `Ok(None)` for 404 so lookups by id can tell "missing" from "failed".
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<Option<T>, SourceError> {
        let url = format!("{}{}", self.base_url, endpoint.path);
        let mut params = endpoint.params.clone();
        if let Some(ref language) = self.language {
            params.push(("language".to_string(), language.clone()));
        }

        debug!("TMDb request: {} {:?}", endpoint.path, params);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
            .query(&params)
            .send()
            .await
            .map_err(|e| SourceError::transport(&endpoint.path, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("TMDb {} returned 404", endpoint.path);
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                path: endpoint.path.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::transport(&endpoint.path, e))?;
        serde_json::from_slice::<T>(&bytes)
            .map(Some)
            .map_err(|e| SourceError::decode(&endpoint.path, e))
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn fetch_page(
        &self,
        kind: MediaKind,
        query: &CatalogQuery,
        page: u32,
    ) -> Result<ResultPage, SourceError> {
        let endpoint = api::list_endpoint(kind, query, page);
        let result = self.get_json::<ResultPage>(&endpoint).await?.unwrap_or_default();

        debug!(
            "TMDb {} {} page {}: {} results, {} total pages",
            kind.plural(),
            query,
            page,
            result.items.len(),
            result.total_pages
        );

        Ok(result)
    }

    async fn fetch_genres(&self, kind: MediaKind) -> Result<Vec<Genre>, SourceError> {
        let endpoint = api::genre_list_endpoint(kind);
        let list = self.get_json::<GenreList>(&endpoint).await?.unwrap_or_default();
        debug!("Fetched {} {} genres", list.genres.len(), kind);
        Ok(list.genres)
    }

    async fn fetch_details(&self, kind: MediaKind, id: u64) -> Result<Option<RawItem>, SourceError> {
        self.get_json::<RawItem>(&api::details_endpoint(kind, id)).await
    }

    async fn fetch_watch_providers(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> Result<Option<WatchProviders>, SourceError> {
        let result = self.get_json::<WatchProviders>(&api::watch_providers_endpoint(kind, id)).await;
        if let Err(ref e) = result {
            warn!("Could not fetch streaming info for {} {}: {}", kind, id, e);
        }
        result
    }

    async fn test_connection(&self) -> Result<(), SourceError> {
        let endpoint = api::configuration_endpoint();
        match self.get_json::<serde_json::Value>(&endpoint).await? {
            Some(_) => Ok(()),
            None => Err(SourceError::Status {
                path: endpoint.path,
                status: 404,
                body: String::new(),
            }),
        }
    }
}
