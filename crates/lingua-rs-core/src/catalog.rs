//! Translation catalog.
//!
//! A [`Catalog`] maps a translation key to a [`CatalogEntry`], a small record
//! of language → text. It is built once, validated, and never mutated
//! afterwards; share it behind an `Arc`.
//!
//! Every entry must carry text for [`Language::FALLBACK`]. Other languages
//! are optional and fall back at resolution time.
//!
//! ## Document Format
//!
//! Catalogs can be parsed from JSON or TOML documents keyed by translation
//! key, then by language code:
//!
//! ```json
//! {
//!   "done": { "en": "Done", "de": "Fertig" },
//!   "deleteLabel": { "en": "Delete", "de": "Löschen" }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::error::{LinguaError, LinguaResult};
use crate::language::{parse_language, Lang, Language};

/// The texts available for a single translation key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry<L: Language = Lang> {
    texts: HashMap<L, String>,
}

impl<L: Language> CatalogEntry<L> {
    /// Returns the text for `language`, if this entry has one.
    pub fn text(&self, language: L) -> Option<&str> {
        self.texts.get(&language).map(String::as_str)
    }

    /// Returns `true` if this entry has text for `language`.
    pub fn has(&self, language: L) -> bool {
        self.texts.contains_key(&language)
    }

    /// Iterates over the languages this entry covers.
    pub fn languages(&self) -> impl Iterator<Item = L> + '_ {
        self.texts.keys().copied()
    }
}

/// An immutable table of translation keys to per-language text.
///
/// # Examples
///
/// ```
/// use lingua_rs_core::catalog::Catalog;
/// use lingua_rs_core::language::Lang;
///
/// let catalog = Catalog::builder()
///     .entry("greet", [(Lang::En, "Hello"), (Lang::De, "Hallo")])
///     .build()
///     .unwrap();
///
/// let entry = catalog.get("greet").unwrap();
/// assert_eq!(entry.text(Lang::En), Some("Hello"));
/// assert!(catalog.get("missing").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Catalog<L: Language = Lang> {
    entries: HashMap<String, CatalogEntry<L>>,
}

impl<L: Language> Catalog<L> {
    /// Starts building a catalog.
    pub fn builder() -> CatalogBuilder<L> {
        CatalogBuilder::new()
    }

    /// Looks up the entry for `key`.
    pub fn get(&self, key: &str) -> Option<&CatalogEntry<L>> {
        self.entries.get(key)
    }

    /// Returns `true` if the catalog has an entry for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Lists keys whose entry has no text for `language`, sorted.
    ///
    /// For the fallback language this is always empty. For any other
    /// language these are the keys that will render fallback text.
    pub fn missing_translations(&self, language: L) -> Vec<&str> {
        let mut missing: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.has(language))
            .map(|(key, _)| key.as_str())
            .collect();
        missing.sort_unstable();
        missing
    }

    /// Parses a catalog from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::CatalogParse`] for malformed documents,
    /// [`LinguaError::UnsupportedLanguage`] for unknown language codes, and
    /// [`LinguaError::MissingFallback`] for entries without fallback text.
    pub fn from_json_str(json_str: &str) -> LinguaResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json_str)
            .map_err(|e| LinguaError::CatalogParse(format!("Invalid JSON: {e}")))?;
        Self::from_document(value)
    }

    /// Parses a catalog from a TOML document.
    ///
    /// Keys containing dots must be quoted, as usual in TOML.
    pub fn from_toml_str(toml_str: &str) -> LinguaResult<Self> {
        let value: toml::Value = toml::from_str(toml_str)
            .map_err(|e| LinguaError::CatalogParse(format!("Invalid TOML: {e}")))?;
        Self::from_document(crate::settings_loader::toml_to_json(value))
    }

    /// Reads a catalog file, choosing TOML for `.toml` and JSON otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> LinguaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    fn from_document(value: serde_json::Value) -> LinguaResult<Self> {
        let serde_json::Value::Object(keys) = value else {
            return Err(LinguaError::CatalogParse(
                "catalog document must be an object of keys".to_string(),
            ));
        };

        let mut builder = CatalogBuilder::new();
        for (key, record) in keys {
            let serde_json::Value::Object(record) = record else {
                return Err(LinguaError::CatalogParse(format!(
                    "entry '{key}' must be an object of language codes"
                )));
            };
            let mut texts = Vec::with_capacity(record.len());
            for (code, text) in record {
                let language = parse_language::<L>(&code)?;
                let serde_json::Value::String(text) = text else {
                    return Err(LinguaError::CatalogParse(format!(
                        "entry '{key}' has a non-string text for '{code}'"
                    )));
                };
                texts.push((language, text));
            }
            builder = builder.entry(key, texts);
        }
        builder.build()
    }
}

/// Collects entries and validates them into a [`Catalog`].
#[derive(Debug)]
pub struct CatalogBuilder<L: Language = Lang> {
    entries: HashMap<String, CatalogEntry<L>>,
    duplicates: Vec<String>,
}

impl<L: Language> Default for CatalogBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Language> CatalogBuilder<L> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Adds the texts for one key.
    ///
    /// Declaring the same key twice is reported by [`build`](Self::build).
    /// Within one declaration a later text for the same language wins.
    #[must_use]
    pub fn entry<I, S>(mut self, key: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = (L, S)>,
        S: Into<String>,
    {
        let key = key.into();
        if self.entries.contains_key(&key) {
            self.duplicates.push(key);
            return self;
        }
        let texts = texts
            .into_iter()
            .map(|(language, text)| (language, text.into()))
            .collect();
        self.entries.insert(key, CatalogEntry { texts });
        self
    }

    /// Validates and freezes the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::DuplicateKey`] if a key was declared twice and
    /// [`LinguaError::MissingFallback`] if an entry lacks fallback text.
    /// When several entries are invalid, the alphabetically first is named.
    pub fn build(self) -> LinguaResult<Catalog<L>> {
        if let Some(key) = self.duplicates.into_iter().min() {
            return Err(LinguaError::DuplicateKey(key));
        }

        let missing_fallback = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.has(L::FALLBACK))
            .map(|(key, _)| key)
            .min();
        if let Some(key) = missing_fallback {
            return Err(LinguaError::MissingFallback {
                key: key.clone(),
                fallback: L::FALLBACK.code(),
            });
        }

        Ok(Catalog {
            entries: self.entries,
        })
    }
}
