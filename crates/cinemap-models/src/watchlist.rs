use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog_item::{CatalogItem, CatalogKey};

/// A snapshot of a catalog item the user saved. The stored fields never
/// change after the entry is added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    #[serde(flatten)]
    pub item: CatalogItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
}

impl WatchlistEntry {
    pub fn new(item: CatalogItem) -> Self {
        Self {
            item,
            date_added: Some(Utc::now()),
        }
    }

    pub fn key(&self) -> CatalogKey {
        self.item.key()
    }
}
