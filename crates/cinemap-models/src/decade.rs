use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::catalog_item::CatalogItem;

/// Decade labels items are grouped under.
///
/// Variant order is chronological, so `DecadeBuckets` iterates oldest first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Decade {
    #[serde(rename = "Earlier")]
    Earlier,
    #[serde(rename = "1980s")]
    Eighties,
    #[serde(rename = "1990s")]
    Nineties,
    #[serde(rename = "2000s")]
    TwoThousands,
    #[serde(rename = "2010s")]
    Tens,
    #[serde(rename = "2020s")]
    Twenties,
}

impl Decade {
    /// The five labelled decades, 1980s through 2020s
    pub const MODERN: [Decade; 5] = [
        Decade::Eighties,
        Decade::Nineties,
        Decade::TwoThousands,
        Decade::Tens,
        Decade::Twenties,
    ];

    /// Classify a release year. Everything before 1980 is `Earlier`,
    /// everything from 2020 on is `2020s`.
    pub fn from_year(year: i32) -> Self {
        match year {
            y if y >= 2020 => Decade::Twenties,
            y if y >= 2010 => Decade::Tens,
            y if y >= 2000 => Decade::TwoThousands,
            y if y >= 1990 => Decade::Nineties,
            y if y >= 1980 => Decade::Eighties,
            _ => Decade::Earlier,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Decade::Earlier => "Earlier",
            Decade::Eighties => "1980s",
            Decade::Nineties => "1990s",
            Decade::TwoThousands => "2000s",
            Decade::Tens => "2010s",
            Decade::Twenties => "2020s",
        }
    }
}

impl fmt::Display for Decade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Decade {
    type Err = String;

    /// Accepts the label ("1990s", "earlier") or a bare year ("1994", "90s")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        if trimmed == "earlier" {
            return Ok(Decade::Earlier);
        }
        let digits = trimmed.trim_end_matches('s');
        let year = match digits.len() {
            2 => digits.parse::<i32>().ok().map(|y| if y >= 30 { 1900 + y } else { 2000 + y }),
            4 => digits.parse::<i32>().ok(),
            _ => None,
        };
        year.map(Decade::from_year)
            .ok_or_else(|| format!("Invalid decade: {}. Use e.g. '1990s', '2020s' or 'earlier'", s))
    }
}

/// How items released before 1980 (or without a usable date) are treated.
///
/// The same policy applies to movies and shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecadePolicy {
    /// Only the five labelled decades exist; older or undated items are dropped
    #[default]
    Cutoff,
    /// Adds an `Earlier` bucket that collects older and undated items
    IncludeEarlier,
}

impl DecadePolicy {
    /// Bucket labels that exist under this policy, oldest first
    pub fn decades(&self) -> Vec<Decade> {
        match self {
            DecadePolicy::Cutoff => Decade::MODERN.to_vec(),
            DecadePolicy::IncludeEarlier => {
                let mut all = vec![Decade::Earlier];
                all.extend(Decade::MODERN);
                all
            }
        }
    }

    /// Whether `decade` has a bucket under this policy
    pub fn includes(&self, decade: Decade) -> bool {
        !(matches!(self, DecadePolicy::Cutoff) && decade == Decade::Earlier)
    }

    /// Decade an item with this release year lands in, or `None` if dropped
    pub fn classify(&self, year: Option<i32>) -> Option<Decade> {
        let decade = year.map(Decade::from_year).unwrap_or(Decade::Earlier);
        match (self, decade) {
            (DecadePolicy::Cutoff, Decade::Earlier) => None,
            _ => Some(decade),
        }
    }
}

/// Decade label -> items, every label of the active policy present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DecadeBuckets {
    buckets: BTreeMap<Decade, Vec<CatalogItem>>,
}

impl DecadeBuckets {
    /// Empty lists for every label of `policy`
    pub fn new(policy: DecadePolicy) -> Self {
        Self {
            buckets: policy.decades().into_iter().map(|d| (d, Vec::new())).collect(),
        }
    }

    /// Group items by their computed decade, then order each bucket by
    /// descending vote average. Items whose decade has no bucket are dropped.
    pub fn organize(policy: DecadePolicy, items: impl IntoIterator<Item = CatalogItem>) -> Self {
        let mut organized = Self::new(policy);
        for item in items {
            organized.insert(item);
        }
        organized.sort_by_rating();
        organized
    }

    /// Push into the item's decade slot; returns false if there is none
    pub fn insert(&mut self, item: CatalogItem) -> bool {
        match item.decade.and_then(|d| self.buckets.get_mut(&d)) {
            Some(bucket) => {
                bucket.push(item);
                true
            }
            None => false,
        }
    }

    /// Stable sort, highest vote average first; missing averages count as 0
    pub fn sort_by_rating(&mut self) {
        for bucket in self.buckets.values_mut() {
            bucket.sort_by(|a, b| b.rating_value().total_cmp(&a.rating_value()));
        }
    }

    pub fn get(&self, decade: Decade) -> Option<&[CatalogItem]> {
        self.buckets.get(&decade).map(|v| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Decade, &[CatalogItem])> {
        self.buckets.iter().map(|(d, items)| (*d, items.as_slice()))
    }

    pub fn labels(&self) -> Vec<Decade> {
        self.buckets.keys().copied().collect()
    }

    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.buckets.values().flatten()
    }

    pub fn total_items(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// True when no bucket holds an item (labels may still be present)
    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }

    /// Same labels, only the items matching `keep`
    pub fn filtered<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&CatalogItem) -> bool,
    {
        Self {
            buckets: self
                .buckets
                .iter()
                .map(|(d, items)| (*d, items.iter().filter(|i| keep(i)).cloned().collect()))
                .collect(),
        }
    }

    /// Keep only one decade (label included even when empty)
    pub fn only(&self, decade: Decade) -> Self {
        Self {
            buckets: self
                .buckets
                .iter()
                .filter(|(d, _)| **d == decade)
                .map(|(d, items)| (*d, items.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MediaKind;

    #[test]
    fn test_policy_includes_earlier_only_when_extended() {
        let seventies: Decade = "1970s".parse().unwrap();
        assert_eq!(seventies, Decade::Earlier);
        assert!(!DecadePolicy::Cutoff.includes(seventies));
        assert!(DecadePolicy::IncludeEarlier.includes(seventies));
        for decade in Decade::MODERN {
            assert!(DecadePolicy::Cutoff.includes(decade));
        }
    }

    fn item(id: u64, year: Option<i32>, rating: Option<f64>, policy: DecadePolicy) -> CatalogItem {
        CatalogItem {
            id,
            kind: MediaKind::Movie,
            title: format!("Movie {}", id),
            year,
            decade: policy.classify(year),
            vote_average: rating,
            ..CatalogItem::default()
        }
    }

    #[test]
    fn test_from_year_boundaries() {
        assert_eq!(Decade::from_year(1979), Decade::Earlier);
        assert_eq!(Decade::from_year(1980), Decade::Eighties);
        assert_eq!(Decade::from_year(1999), Decade::Nineties);
        assert_eq!(Decade::from_year(2000), Decade::TwoThousands);
        assert_eq!(Decade::from_year(2019), Decade::Tens);
        assert_eq!(Decade::from_year(2031), Decade::Twenties);
    }

    #[test]
    fn test_policy_classify_pre_1980() {
        assert_eq!(DecadePolicy::Cutoff.classify(Some(1975)), None);
        assert_eq!(DecadePolicy::Cutoff.classify(None), None);
        assert_eq!(DecadePolicy::IncludeEarlier.classify(Some(1975)), Some(Decade::Earlier));
        assert_eq!(DecadePolicy::IncludeEarlier.classify(None), Some(Decade::Earlier));
        assert_eq!(DecadePolicy::Cutoff.classify(Some(1985)), Some(Decade::Eighties));
    }

    #[test]
    fn test_new_has_every_label() {
        assert_eq!(DecadeBuckets::new(DecadePolicy::Cutoff).labels(), Decade::MODERN.to_vec());
        let inclusive = DecadeBuckets::new(DecadePolicy::IncludeEarlier);
        assert_eq!(inclusive.labels().first(), Some(&Decade::Earlier));
        assert_eq!(inclusive.labels().len(), 6);
        assert!(inclusive.is_empty());
    }

    #[test]
    fn test_organize_sorts_descending_and_drops_unbucketed() {
        let policy = DecadePolicy::Cutoff;
        let items = vec![
            item(1, Some(1994), Some(6.1), policy),
            item(2, Some(1991), Some(8.4), policy),
            item(3, Some(1975), Some(9.0), policy),
            item(4, Some(1998), None, policy),
            item(5, Some(1992), Some(8.4), policy),
        ];

        let organized = DecadeBuckets::organize(policy, items);
        let nineties: Vec<u64> = organized.get(Decade::Nineties).unwrap().iter().map(|i| i.id).collect();
        // ties keep first-seen order
        assert_eq!(nineties, vec![2, 5, 1, 4]);
        assert_eq!(organized.total_items(), 4);
    }

    #[test]
    fn test_serializes_with_labels_as_keys() {
        let organized = DecadeBuckets::organize(
            DecadePolicy::Cutoff,
            vec![item(7, Some(2021), Some(7.0), DecadePolicy::Cutoff)],
        );
        let json = serde_json::to_value(&organized).unwrap();
        assert_eq!(json["2020s"][0]["id"], 7);
        assert!(json["1980s"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_decade_from_str() {
        assert_eq!("1990s".parse::<Decade>().unwrap(), Decade::Nineties);
        assert_eq!("90s".parse::<Decade>().unwrap(), Decade::Nineties);
        assert_eq!("20s".parse::<Decade>().unwrap(), Decade::Twenties);
        assert_eq!("Earlier".parse::<Decade>().unwrap(), Decade::Earlier);
        assert!("banana".parse::<Decade>().is_err());
    }
}
