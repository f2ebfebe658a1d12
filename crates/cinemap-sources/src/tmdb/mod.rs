pub mod api;
pub mod client;

pub use client::{create_tmdb_client, TmdbClient};
