use serde::Serialize;

/// A selectable country: display name, ISO 3166-1 alpha-2 code, and the
/// primary original language used when country-of-origin discovery comes
/// back empty.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Country {
    pub name: &'static str,
    pub code: &'static str,
    pub fallback_language: Option<&'static str>,
}

const fn country(name: &'static str, code: &'static str) -> Country {
    Country { name, code, fallback_language: None }
}

const fn country_lang(name: &'static str, code: &'static str, language: &'static str) -> Country {
    Country { name, code, fallback_language: Some(language) }
}

/// Every supported country. Anything outside this list is rejected before
/// a request is made.
pub const COUNTRIES: &[Country] = &[
    country("United States", "US"),
    country("United Kingdom", "GB"),
    country_lang("France", "FR", "fr"),
    country_lang("Germany", "DE", "de"),
    country_lang("Japan", "JP", "ja"),
    country_lang("South Korea", "KR", "ko"),
    country_lang("India", "IN", "hi"),
    country_lang("China", "CN", "zh"),
    country_lang("Italy", "IT", "it"),
    country_lang("Spain", "ES", "es"),
    country("Canada", "CA"),
    country("Australia", "AU"),
    country_lang("Brazil", "BR", "pt"),
    country("Mexico", "MX"),
    country_lang("Russia", "RU", "ru"),
    country("Netherlands", "NL"),
    country("Sweden", "SE"),
    country("Norway", "NO"),
    country("Denmark", "DK"),
    country("Finland", "FI"),
    country("Poland", "PL"),
    country("Czech Republic", "CZ"),
    country("Hungary", "HU"),
    country("Austria", "AT"),
    country("Switzerland", "CH"),
    country("Belgium", "BE"),
    country("Portugal", "PT"),
    country("Ireland", "IE"),
    country("Greece", "GR"),
    country("Turkey", "TR"),
    country("Israel", "IL"),
    country("Egypt", "EG"),
    country("South Africa", "ZA"),
    country("Argentina", "AR"),
    country("Chile", "CL"),
    country("Colombia", "CO"),
    country("Thailand", "TH"),
    country("Indonesia", "ID"),
    country("Malaysia", "MY"),
    country("Singapore", "SG"),
    country("Philippines", "PH"),
    country("Vietnam", "VN"),
    country("Hong Kong", "HK"),
    country("Taiwan", "TW"),
];

impl Country {
    /// Resolve a display name (case-insensitive) or an ISO code
    pub fn lookup(name_or_code: &str) -> Option<&'static Country> {
        let needle = name_or_code.trim();
        if needle.is_empty() {
            return None;
        }
        COUNTRIES.iter().find(|c| {
            c.code.eq_ignore_ascii_case(needle) || c.name.eq_ignore_ascii_case(needle)
        })
    }

    pub fn by_code(code: &str) -> Option<&'static Country> {
        COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn all() -> &'static [Country] {
        COUNTRIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_by_name_and_code() {
        assert_eq!(Country::lookup("japan").map(|c| c.code), Some("JP"));
        assert_eq!(Country::lookup("South Korea").map(|c| c.code), Some("KR"));
        assert_eq!(Country::lookup("gb").map(|c| c.name), Some("United Kingdom"));
        assert!(Country::lookup("Atlantis").is_none());
        assert!(Country::lookup("  ").is_none());
    }

    #[test]
    fn test_vocabulary_has_unique_codes() {
        let codes: HashSet<&str> = COUNTRIES.iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), COUNTRIES.len());
        assert_eq!(COUNTRIES.len(), 44);
    }

    #[test]
    fn test_fallback_languages() {
        assert_eq!(Country::by_code("CN").and_then(|c| c.fallback_language), Some("zh"));
        assert_eq!(Country::by_code("BR").and_then(|c| c.fallback_language), Some("pt"));
        assert_eq!(Country::by_code("US").and_then(|c| c.fallback_language), None);
        let with_language = COUNTRIES.iter().filter(|c| c.fallback_language.is_some()).count();
        assert_eq!(with_language, 10);
    }
}
