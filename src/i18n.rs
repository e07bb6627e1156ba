use std::collections::HashMap;

// Embedded catalogs, one per locale
const CATALOG_EN: &str = include_str!("nls/en.json");
const CATALOG_FR: &str = include_str!("nls/fr.json");

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "fr" | "fr-fr" | "fr_fr" => Locale::Fr,
            _ => Locale::En,
        }
    }
}

/// Message catalog keyed by message key.
///
/// Lookups of unknown keys return the key itself; no other fallback is attempted.
#[derive(Clone, Debug, Default)]
pub struct Messages {
    entries: HashMap<String, String>,
}

impl Messages {
    pub fn load(locale: Locale) -> Self {
        let raw = match locale {
            Locale::En => CATALOG_EN,
            Locale::Fr => CATALOG_FR,
        };
        match serde_json::from_str::<HashMap<String, String>>(raw) {
            Ok(entries) => Self { entries },
            Err(e) => {
                tracing::error!(%e, ?locale, "Failed to parse message catalog");
                Self::default()
            }
        }
    }

    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
