use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog_item::CatalogItem;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    pub provider_id: u32,
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub display_priority: Option<u32>,
}

/// Availability in one region
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegionProviders {
    #[serde(default)]
    pub link: Option<String>,
    /// Subscription streaming
    #[serde(default)]
    pub flatrate: Vec<Provider>,
    #[serde(default)]
    pub rent: Vec<Provider>,
    #[serde(default)]
    pub buy: Vec<Provider>,
}

/// Body of `/{kind}/{id}/watch/providers`, keyed by ISO region code
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WatchProviders {
    #[serde(default)]
    pub results: BTreeMap<String, RegionProviders>,
}

impl WatchProviders {
    /// Region to read availability from: the first preferred region that is
    /// present, otherwise the first region in code order
    pub fn region_for(&self, preferred_regions: &[String]) -> Option<&RegionProviders> {
        preferred_regions
            .iter()
            .find_map(|region| self.results.get(region.as_str()))
            .or_else(|| self.results.values().next())
    }

    /// Subscription platform names for the chosen region, without duplicates
    pub fn platforms(&self, preferred_regions: &[String]) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        if let Some(region) = self.region_for(preferred_regions) {
            for provider in &region.flatrate {
                if !names.contains(&provider.provider_name) {
                    names.push(provider.provider_name.clone());
                }
            }
        }
        names
    }
}

/// A globally ranked item with its streaming availability.
///
/// `providers` is `None` when the availability lookup failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamingPick {
    #[serde(flatten)]
    pub item: CatalogItem,
    #[serde(default)]
    pub providers: Option<WatchProviders>,
}

impl StreamingPick {
    pub fn platforms(&self, preferred_regions: &[String]) -> Vec<String> {
        self.providers
            .as_ref()
            .map(|p| p.platforms(preferred_regions))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn providers_json() -> WatchProviders {
        serde_json::from_str(
            r#"{
                "id": 550,
                "results": {
                    "DE": {"flatrate": [{"provider_id": 9, "provider_name": "Amazon Prime Video"}]},
                    "IN": {"flatrate": [{"provider_id": 122, "provider_name": "Hotstar"}]},
                    "US": {
                        "link": "https://example.invalid/watch",
                        "flatrate": [
                            {"provider_id": 8, "provider_name": "Netflix", "display_priority": 1},
                            {"provider_id": 8, "provider_name": "Netflix", "display_priority": 3},
                            {"provider_id": 337, "provider_name": "Disney Plus"}
                        ],
                        "rent": [{"provider_id": 2, "provider_name": "Apple TV"}]
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_platforms_prefers_first_listed_region() {
        let providers = providers_json();
        let preferred = vec!["US".to_string(), "IN".to_string()];
        assert_eq!(providers.platforms(&preferred), vec!["Netflix", "Disney Plus"]);

        let india_first = vec!["IN".to_string(), "US".to_string()];
        assert_eq!(providers.platforms(&india_first), vec!["Hotstar"]);
    }

    #[test]
    fn test_platforms_falls_back_to_first_region() {
        let providers = providers_json();
        assert_eq!(providers.platforms(&["FR".to_string()]), vec!["Amazon Prime Video"]);
        assert!(WatchProviders::default().platforms(&["US".to_string()]).is_empty());
    }
}
