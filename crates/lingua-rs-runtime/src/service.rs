//! The consumer-facing translation API.
//!
//! [`TranslationService`] binds an immutable [`Catalog`] to a
//! [`PreferenceContext`]. `translate` is always resolved against the
//! language active at call time, so a consumer that re-renders on a
//! [`LanguageChanged`] notification never shows a stale language.

use std::sync::Arc;

use lingua_rs_core::resolver::resolve_detailed;
use lingua_rs_core::{
    parse_language, Catalog, Lang, Language, LinguaError, LinguaResult, Resolution, Settings,
};
use lingua_rs_signals::Subscription;
use lingua_rs_storage::{MemoryStorage, PreferenceStore};
use tokio::task::JoinHandle;

use crate::context::{LanguageChanged, PreferenceContext, RestoreOutcome};
use crate::lazy::LazyText;

/// Translates keys for the active language of one session.
///
/// Cloning is cheap; clones share the catalog and the session state.
pub struct TranslationService<L: Language = Lang> {
    catalog: Arc<Catalog<L>>,
    context: PreferenceContext<L>,
}

impl<L: Language> Clone for TranslationService<L> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            context: self.context.clone(),
        }
    }
}

impl<L: Language> std::fmt::Debug for TranslationService<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService")
            .field("keys", &self.catalog.len())
            .field("context", &self.context)
            .finish()
    }
}

impl<L: Language> TranslationService<L> {
    /// Creates a service over `catalog` and an existing context.
    pub fn new(catalog: Catalog<L>, context: PreferenceContext<L>) -> Self {
        Self::with_shared_catalog(Arc::new(catalog), context)
    }

    /// Creates a service over a catalog shared with other sessions.
    pub const fn with_shared_catalog(catalog: Arc<Catalog<L>>, context: PreferenceContext<L>) -> Self {
        Self { catalog, context }
    }

    /// Creates a service starting at [`Language::DEFAULT`] whose preference
    /// lives only in memory.
    pub fn in_memory(catalog: Catalog<L>) -> Self {
        let store = PreferenceStore::new(Arc::new(MemoryStorage::new()));
        Self::new(catalog, PreferenceContext::new(store))
    }

    /// Builds a service from configuration.
    ///
    /// Validates `settings`, starts at `settings.default_language`, persists
    /// through the configured storage under `settings.preference_key`, and
    /// spawns the preference restore when a tokio runtime is available.
    ///
    /// # Errors
    ///
    /// Returns the validation or storage construction error.
    pub fn from_settings(settings: &Settings, catalog: Catalog<L>) -> LinguaResult<Self> {
        settings.validate::<L>()?;
        let initial = settings.language::<L>()?;
        let backend = lingua_rs_storage::from_settings(&settings.storage)?;
        let store = PreferenceStore::with_key(backend, settings.preference_key.clone());

        let context = PreferenceContext::with_language(initial, store);
        if context.spawn_restore().is_none() {
            tracing::debug!("preference restore not started; call restore() once a runtime is available");
        }
        Ok(Self::new(catalog, context))
    }

    /// Like [`from_settings`](Self::from_settings), reading the catalog
    /// from `settings.catalog_path`.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::ConfigurationError`] if no catalog path is
    /// configured, or the catalog loading error.
    pub fn from_settings_with_catalog_file(settings: &Settings) -> LinguaResult<Self> {
        let path = settings.catalog_path.as_ref().ok_or_else(|| {
            LinguaError::ConfigurationError("catalog_path is not configured".to_string())
        })?;
        let catalog = Catalog::from_file(path)?;
        tracing::debug!(path = %path.display(), keys = catalog.len(), "loaded catalog");
        Self::from_settings(settings, catalog)
    }

    /// Resolves `key` for the active language.
    ///
    /// Never fails: a key without text in the active language yields the
    /// fallback text, and an unknown key yields the key itself.
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.translate_in(key, self.context.active_language())
    }

    /// Resolves `key` for an explicit language, ignoring the active one.
    pub fn translate_in<'a>(&'a self, key: &'a str, language: L) -> &'a str {
        let (text, resolution) = resolve_detailed(&self.catalog, key, language);
        match resolution {
            Resolution::Exact => {}
            Resolution::Fallback => {
                tracing::trace!(key, language = language.code(), "using fallback text");
            }
            Resolution::Missing => {
                tracing::debug!(key, "no catalog entry; rendering the key");
            }
        }
        text
    }

    /// A translation deferred until it is displayed.
    pub fn lazy(&self, key: impl Into<String>) -> LazyText<L> {
        LazyText::new(self.clone(), key.into())
    }

    /// The currently active language.
    pub fn active_language(&self) -> L {
        self.context.active_language()
    }

    /// Makes `language` active, notifies subscribers, and queues a save.
    pub fn set_language(&self, language: L) {
        self.context.set_active_language(language);
    }

    /// Parses `code` and makes it active.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::UnsupportedLanguage`] and leaves the active
    /// language untouched if `code` is not supported.
    pub fn set_language_code(&self, code: &str) -> LinguaResult<()> {
        let language = parse_language::<L>(code)?;
        self.set_language(language);
        Ok(())
    }

    /// Registers `callback` for language changes until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LanguageChanged<L>) + Send + Sync + 'static,
    {
        self.context.subscribe(callback)
    }

    /// Every supported language, in presentation order.
    pub fn supported_languages(&self) -> &'static [L] {
        L::ALL
    }

    /// The catalog being served.
    pub fn catalog(&self) -> &Catalog<L> {
        &self.catalog
    }

    /// The underlying session state.
    pub fn context(&self) -> &PreferenceContext<L> {
        &self.context
    }

    /// See [`PreferenceContext::restore`].
    pub async fn restore(&self) -> RestoreOutcome<L> {
        self.context.restore().await
    }

    /// See [`PreferenceContext::spawn_restore`].
    pub fn spawn_restore(&self) -> Option<JoinHandle<RestoreOutcome<L>>> {
        self.context.spawn_restore()
    }

    /// See [`PreferenceContext::settle`].
    pub async fn settle(&self) {
        self.context.settle().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn catalog() -> Catalog {
        Catalog::builder()
            .entry("greet", [(Lang::En, "Hello"), (Lang::De, "Hallo")])
            .entry("done", [(Lang::De, "Fertig")])
            .build()
            .unwrap()
    }

    #[test]
    fn test_translate_follows_active_language() {
        let service = TranslationService::in_memory(catalog());
        assert_eq!(service.translate("greet"), "Hallo");
        service.set_language(Lang::En);
        assert_eq!(service.translate("greet"), "Hello");
        assert_eq!(service.translate("done"), "Fertig");
        assert_eq!(service.translate("missingKey"), "missingKey");
    }

    #[test]
    fn test_translate_in() {
        let service = TranslationService::in_memory(catalog());
        assert_eq!(service.translate_in("greet", Lang::En), "Hello");
        assert_eq!(service.active_language(), Lang::De);
    }

    #[test]
    fn test_set_language_code() {
        let service = TranslationService::in_memory(catalog());
        service.set_language_code("en").unwrap();
        assert_eq!(service.active_language(), Lang::En);

        let err = service.set_language_code("fr").unwrap_err();
        assert!(matches!(err, LinguaError::UnsupportedLanguage(code) if code == "fr"));
        assert_eq!(service.active_language(), Lang::En);
    }

    #[test]
    fn test_subscriber_sees_new_translation() {
        let service = TranslationService::in_memory(catalog());
        let rendered = Arc::new(Mutex::new(Vec::new()));

        let observer = service.clone();
        let r = Arc::clone(&rendered);
        let _sub = service.subscribe(move |_| {
            r.lock().unwrap().push(observer.translate("greet").to_string());
        });

        service.set_language(Lang::En);
        service.set_language(Lang::De);
        assert_eq!(*rendered.lock().unwrap(), vec!["Hello", "Hallo"]);
    }

    #[test]
    fn test_supported_languages() {
        let service = TranslationService::in_memory(catalog());
        assert_eq!(service.supported_languages(), &[Lang::En, Lang::De]);
        assert_eq!(service.catalog().len(), 2);
    }

    #[test]
    fn test_from_settings_rejects_invalid() {
        let settings = Settings {
            default_language: "fr".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            TranslationService::<Lang>::from_settings(&settings, catalog()),
            Err(LinguaError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_from_settings_with_catalog_file_requires_path() {
        assert!(matches!(
            TranslationService::<Lang>::from_settings_with_catalog_file(&Settings::default()),
            Err(LinguaError::ConfigurationError(_))
        ));
    }

    #[tokio::test]
    async fn test_from_settings_starts_at_configured_language() {
        let settings = Settings {
            default_language: "en".to_string(),
            ..Settings::default()
        };
        let service = TranslationService::from_settings(&settings, catalog()).unwrap();
        assert_eq!(service.translate("greet"), "Hello");

        // The restore was already spawned; memory storage has nothing stored.
        assert_eq!(service.restore().await, RestoreOutcome::AlreadyAttempted);
    }
}
