use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// Fixed catalog of external dictionaries a word can link out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DictionaryType {
    HansWehr,
    LanesLexicon,
    AlMaany,
    LivingArabic,
    Wiktionary,
    Custom,
}

/// Presentation metadata for a dictionary type. `base_url` is catalog data
/// only; building concrete lookup URLs is left to the presentation layer.
pub struct DictionaryInfo {
    pub display_name: &'static str,
    pub base_url: Option<&'static str>,
}

impl DictionaryType {
    pub fn info(&self) -> DictionaryInfo {
        match self {
            DictionaryType::HansWehr => DictionaryInfo {
                display_name: "Hans Wehr",
                base_url: Some("https://www.ejtaal.net/aa/"),
            },
            DictionaryType::LanesLexicon => DictionaryInfo {
                display_name: "Lane's Lexicon",
                base_url: Some("https://lexicon.quranic-research.net/"),
            },
            DictionaryType::AlMaany => DictionaryInfo {
                display_name: "Almaany",
                base_url: Some("https://www.almaany.com/"),
            },
            DictionaryType::LivingArabic => DictionaryInfo {
                display_name: "Living Arabic",
                base_url: Some("https://www.livingarabic.com/"),
            },
            DictionaryType::Wiktionary => DictionaryInfo {
                display_name: "Wiktionary",
                base_url: Some("https://en.wiktionary.org/"),
            },
            DictionaryType::Custom => DictionaryInfo { display_name: "Custom", base_url: None },
        }
    }

    pub fn all() -> &'static [DictionaryType] {
        &[
            DictionaryType::HansWehr,
            DictionaryType::LanesLexicon,
            DictionaryType::AlMaany,
            DictionaryType::LivingArabic,
            DictionaryType::Wiktionary,
            DictionaryType::Custom,
        ]
    }

    /// Custom links carry their own URL; catalog entries fall back to the
    /// catalog when the link omits one.
    pub fn requires_url(&self) -> bool {
        matches!(self, DictionaryType::Custom)
    }
}

impl fmt::Display for DictionaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info().display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_metadata() {
        assert_eq!(DictionaryType::HansWehr.to_string(), "Hans Wehr");
        assert!(DictionaryType::HansWehr.info().base_url.is_some());
        assert!(DictionaryType::Custom.info().base_url.is_none());
    }

    #[test]
    fn test_only_custom_requires_url() {
        for dict_type in DictionaryType::all() {
            assert_eq!(dict_type.requires_url(), matches!(dict_type, DictionaryType::Custom));
        }
    }
}
