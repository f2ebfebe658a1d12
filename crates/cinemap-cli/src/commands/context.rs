use cinemap_config::{Config, CredentialStore, PathManager};
use cinemap_core::{Aggregator, CatalogLookup, GenreFilter, StreamingService, WatchlistStore};
use cinemap_sources::{create_source, CatalogSource};
use color_eyre::Result;
use std::sync::Arc;
use tracing::debug;

/// Configuration, paths and credentials every command starts from
pub struct Settings {
    pub paths: PathManager,
    pub config: Config,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        Ok(Self { paths, config })
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        let credentials_file = self.paths.credentials_file();
        let mut store = CredentialStore::new(credentials_file.clone());
        store
            .load()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
        Ok(store)
    }

    pub fn watchlist(&self) -> WatchlistStore {
        WatchlistStore::open(self.paths.watchlist_file())
    }
}

/// Everything that talks to the catalog, sharing one client and, for the
/// lifetime of the process, one set of caches
pub struct Catalog {
    pub settings: Settings,
    pub source: Arc<dyn CatalogSource>,
    pub aggregator: Aggregator,
    pub genres: GenreFilter,
    pub streaming: StreamingService,
    pub lookup: CatalogLookup,
}

impl Catalog {
    pub fn connect(settings: Settings) -> Result<Self> {
        let credentials = settings.credentials()?;
        let source = create_source(&settings.config, &credentials)
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        debug!("Using catalog source {}", source.source_name());

        let config = &settings.config;
        let image_base = config.tmdb.image_base_url.as_str();
        let policy = config.aggregation.decade_policy;

        Ok(Self {
            aggregator: Aggregator::new(Arc::clone(&source), &config.aggregation, image_base),
            genres: GenreFilter::new(Arc::clone(&source)),
            streaming: StreamingService::new(Arc::clone(&source), &config.streaming, image_base, policy),
            lookup: CatalogLookup::new(Arc::clone(&source), image_base, policy),
            source,
            settings,
        })
    }

    pub fn open() -> Result<Self> {
        Self::connect(Settings::load()?)
    }
}
