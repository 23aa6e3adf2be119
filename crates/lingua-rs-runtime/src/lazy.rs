//! Deferred translations.
//!
//! [`LazyText`] holds a key and a handle to its service, and resolves only
//! when displayed. Labels built once (menu entries, column headers) then
//! follow language changes without being rebuilt.

use std::fmt;

use lingua_rs_core::{Lang, Language};

use crate::service::TranslationService;

/// A translation evaluated against the language active at render time.
///
/// # Examples
///
/// ```
/// use lingua_rs_core::{Catalog, Lang};
/// use lingua_rs_runtime::TranslationService;
///
/// let catalog = Catalog::builder()
///     .entry("done", [(Lang::En, "Done"), (Lang::De, "Fertig")])
///     .build()
///     .unwrap();
/// let service = TranslationService::in_memory(catalog);
///
/// let label = service.lazy("done");
/// assert_eq!(label.to_string(), "Fertig");
///
/// service.set_language(Lang::En);
/// assert_eq!(label.to_string(), "Done");
/// ```
#[derive(Clone)]
pub struct LazyText<L: Language = Lang> {
    service: TranslationService<L>,
    key: String,
}

impl<L: Language> LazyText<L> {
    pub(crate) const fn new(service: TranslationService<L>, key: String) -> Self {
        Self { service, key }
    }

    /// The untranslated key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Resolves the key in the currently active language.
    pub fn evaluate(&self) -> String {
        self.service.translate(&self.key).to_string()
    }
}

impl<L: Language> fmt::Display for LazyText<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service.translate(&self.key))
    }
}

impl<L: Language> fmt::Debug for LazyText<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyText").field("key", &self.key).finish()
    }
}

impl<L: Language> PartialEq<str> for LazyText<L> {
    fn eq(&self, other: &str) -> bool {
        self.service.translate(&self.key) == other
    }
}

impl<L: Language> PartialEq<&str> for LazyText<L> {
    fn eq(&self, other: &&str) -> bool {
        self.service.translate(&self.key) == *other
    }
}

impl<L: Language> From<LazyText<L>> for String {
    fn from(lazy: LazyText<L>) -> Self {
        lazy.evaluate()
    }
}

#[cfg(test)]
mod tests {
    use lingua_rs_core::Catalog;

    use super::*;

    fn service() -> TranslationService {
        let catalog = Catalog::builder()
            .entry("greet", [(Lang::En, "Hello"), (Lang::De, "Hallo")])
            .build()
            .unwrap();
        TranslationService::in_memory(catalog)
    }

    #[test]
    fn test_lazy_follows_language() {
        let service = service();
        let lazy = service.lazy("greet");
        assert_eq!(lazy.to_string(), "Hallo");

        service.set_language(Lang::En);
        assert_eq!(lazy.to_string(), "Hello");
        assert!(lazy == "Hello");
    }

    #[test]
    fn test_lazy_unknown_key() {
        let lazy = service().lazy("missingKey");
        assert_eq!(lazy.key(), "missingKey");
        assert_eq!(String::from(lazy), "missingKey");
    }

    #[test]
    fn test_lazy_debug_shows_key_only() {
        let lazy = service().lazy("greet");
        assert_eq!(format!("{lazy:?}"), r#"LazyText { key: "greet" }"#);
    }
}
