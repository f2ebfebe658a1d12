pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{AggregationConfig, Config, LoggingConfig, StreamingConfig, TmdbConfig};
pub use credentials::{mask_secret, CredentialStore, ACCESS_TOKEN_ENV};
pub use paths::{home_override, PathManager, HOME_ENV};
