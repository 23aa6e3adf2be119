//! The persisted language preference.
//!
//! [`PreferenceStore`] wraps a [`StorageBackend`] and a single key. Nothing
//! it does is allowed to fail the caller: unreadable, invalid, or
//! unavailable data reads as "no preference", and write failures are logged
//! and reported but never panic.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use lingua_rs_core::settings::DEFAULT_PREFERENCE_KEY;
use lingua_rs_core::{Lang, Language, LinguaResult};

use crate::backend::{MemoryStorage, StorageBackend};

/// Reads and writes the language preference under one key.
///
/// Cloning is cheap and clones share the same medium.
pub struct PreferenceStore<L: Language = Lang> {
    backend: Arc<dyn StorageBackend>,
    key: String,
    _language: PhantomData<fn() -> L>,
}

impl<L: Language> Clone for PreferenceStore<L> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            key: self.key.clone(),
            _language: PhantomData,
        }
    }
}

impl<L: Language> fmt::Debug for PreferenceStore<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<L: Language> Default for PreferenceStore<L> {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }
}

impl<L: Language> PreferenceStore<L> {
    /// Creates a store using the conventional `"uiLanguage"` key.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_key(backend, DEFAULT_PREFERENCE_KEY)
    }

    /// Creates a store using a custom key.
    pub fn with_key(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            _language: PhantomData,
        }
    }

    /// The key the preference is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying medium.
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Loads the stored preference.
    ///
    /// Returns `None` when nothing is stored, when the stored value is not
    /// a supported language code, or when the medium cannot be read.
    pub async fn load(&self) -> Option<L> {
        let raw = match self.backend.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored language preference");
                return None;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read language preference");
                return None;
            }
        };

        let language = L::from_code(&raw);
        if language.is_none() {
            tracing::warn!(key = %self.key, value = %raw, "ignoring unsupported stored language");
        }
        language
    }

    /// Saves `language` as the preference, overwriting any previous value.
    ///
    /// Failures are logged here as well as returned, so fire-and-forget
    /// callers may drop the result.
    pub async fn save(&self, language: L) -> LinguaResult<()> {
        let result = self.backend.set(&self.key, language.code()).await;
        match &result {
            Ok(()) => tracing::debug!(key = %self.key, language = language.code(), "saved language preference"),
            Err(e) => tracing::warn!(key = %self.key, error = %e, "failed to save language preference"),
        }
        result
    }
}
