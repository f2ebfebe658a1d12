use cinemap_models::DecadePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
    #[serde(default)]
    pub streaming: StreamingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream catalog API settings. The bearer token itself lives in the
/// credential store, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Language for titles and overviews (e.g. "en-US"); API default when unset
    #[serde(default)]
    pub language: Option<String>,
}

/// Page budgets and pacing for the per-country fetch phases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    #[serde(default = "default_popular_pages")]
    pub popular_pages: u32,
    #[serde(default = "default_top_rated_pages")]
    pub top_rated_pages: u32,
    #[serde(default = "default_year_range_pages")]
    pub year_range_pages: u32,
    #[serde(default = "default_language_pages")]
    pub language_pages: u32,
    /// Pause between successive pages of the popularity, rating and language phases
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
    /// Pause between successive pages of each year-range query
    #[serde(default = "default_year_range_delay_ms")]
    pub year_range_delay_ms: u64,
    #[serde(default)]
    pub decade_policy: DecadePolicy,
}

/// Settings for the global "best of" listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingConfig {
    #[serde(default = "default_top_rated_pages")]
    pub top_rated_pages: u32,
    #[serde(default = "default_trending_pages")]
    pub trending_pages: u32,
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
    /// Regions whose availability is read first, in order
    #[serde(default = "default_preferred_regions")]
    pub preferred_regions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to this file (rotated daily) instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_popular_pages() -> u32 {
    10
}

fn default_top_rated_pages() -> u32 {
    5
}

fn default_year_range_pages() -> u32 {
    3
}

fn default_language_pages() -> u32 {
    3
}

fn default_trending_pages() -> u32 {
    3
}

fn default_page_delay_ms() -> u64 {
    100
}

fn default_year_range_delay_ms() -> u64 {
    50
}

fn default_preferred_regions() -> Vec<String> {
    vec!["US".to_string(), "IN".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            timeout_seconds: default_timeout_seconds(),
            language: None,
        }
    }
}

impl TmdbConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            popular_pages: default_popular_pages(),
            top_rated_pages: default_top_rated_pages(),
            year_range_pages: default_year_range_pages(),
            language_pages: default_language_pages(),
            page_delay_ms: default_page_delay_ms(),
            year_range_delay_ms: default_year_range_delay_ms(),
            decade_policy: DecadePolicy::default(),
        }
    }
}

impl AggregationConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn year_range_delay(&self) -> Duration {
        Duration::from_millis(self.year_range_delay_ms)
    }
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            top_rated_pages: default_top_rated_pages(),
            trending_pages: default_trending_pages(),
            page_delay_ms: default_page_delay_ms(),
            preferred_regions: default_preferred_regions(),
        }
    }
}

impl StreamingConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (field, url) in [
            ("tmdb.base_url", &self.tmdb.base_url),
            ("tmdb.image_base_url", &self.tmdb.image_base_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(anyhow::anyhow!("{} must be an http(s) URL, got '{}'", field, url));
            }
        }

        if self.tmdb.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("tmdb.timeout_seconds must be greater than zero"));
        }

        if self.aggregation.popular_pages == 0 {
            return Err(anyhow::anyhow!("aggregation.popular_pages must be greater than zero"));
        }

        if self.streaming.top_rated_pages == 0 && self.streaming.trending_pages == 0 {
            return Err(anyhow::anyhow!(
                "streaming.top_rated_pages and streaming.trending_pages cannot both be zero"
            ));
        }

        for region in &self.streaming.preferred_regions {
            if region.len() != 2 || !region.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(anyhow::anyhow!(
                    "Invalid region in streaming.preferred_regions: {} (expected e.g. 'US')",
                    region
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.aggregation.popular_pages = 4;
        config.aggregation.decade_policy = DecadePolicy::IncludeEarlier;
        config.streaming.preferred_regions = vec!["GB".to_string()];

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.aggregation.popular_pages, 4);
        assert_eq!(loaded.aggregation.decade_policy, DecadePolicy::IncludeEarlier);
        assert_eq!(loaded.streaming.preferred_regions, vec!["GB".to_string()]);
        assert_eq!(loaded.tmdb.base_url, "https://api.themoviedb.org/3");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [aggregation]
            page_delay_ms = 0
            decade_policy = "include_earlier"
            "#,
        )
        .unwrap();

        assert_eq!(config.aggregation.page_delay(), Duration::ZERO);
        assert_eq!(config.aggregation.popular_pages, 10);
        assert_eq!(config.aggregation.top_rated_pages, 5);
        assert_eq!(config.aggregation.year_range_delay(), Duration::from_millis(50));
        assert_eq!(config.aggregation.decade_policy, DecadePolicy::IncludeEarlier);
        assert_eq!(config.tmdb.timeout(), Duration::from_secs(10));
        assert_eq!(config.streaming.preferred_regions, vec!["US", "IN"]);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.aggregation.popular_pages, 10);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.tmdb.timeout_seconds = 0;
        assert!(config.validate().is_err());
        config.tmdb.timeout_seconds = 5;

        config.tmdb.base_url = "api.themoviedb.org".to_string();
        assert!(config.validate().is_err());
        config.tmdb.base_url = default_base_url();

        config.streaming.preferred_regions = vec!["usa".to_string()];
        assert!(config.validate().is_err());
        config.streaming.preferred_regions = default_preferred_regions();

        config.aggregation.popular_pages = 0;
        assert!(config.validate().is_err());
    }
}
