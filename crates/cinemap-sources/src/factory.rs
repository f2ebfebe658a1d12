//! Builds the catalog source from configuration and stored credentials.

use anyhow::Result;
use cinemap_config::{Config, CredentialStore};
use std::sync::Arc;
use tracing::debug;

use crate::error::SourceError;
use crate::tmdb::TmdbClient;
use crate::traits::CatalogSource;

/// Create the TMDb source.
///
/// The token comes from `TMDB_ACCESS_TOKEN` when set, otherwise from the
/// credential store. A missing token is an error: every endpoint requires it.
pub fn create_source(config: &Config, credentials: &CredentialStore) -> Result<Arc<dyn CatalogSource>> {
    config.validate()?;

    let token = credentials
        .resolve_access_token()
        .ok_or(SourceError::MissingToken)?;

    debug!("Creating TMDb source for {}", config.tmdb.base_url);
    Ok(Arc::new(TmdbClient::new(token, &config.tmdb)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_source_with_stored_token() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.set_tmdb_access_token("stored-token".to_string());

        let source = create_source(&Config::default(), &store).unwrap();
        assert_eq!(source.source_name(), "tmdb");
    }

    #[test]
    fn test_create_source_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.set_tmdb_access_token("stored-token".to_string());

        let mut config = Config::default();
        config.tmdb.timeout_seconds = 0;
        assert!(create_source(&config, &store).is_err());
    }
}
