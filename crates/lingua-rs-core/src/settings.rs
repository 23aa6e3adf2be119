//! Settings for lingua-rs.
//!
//! [`Settings`] holds the runtime configuration of a localization session:
//! which language to start in, where the preference lives, where the catalog
//! comes from, and how to log. Unlike a process-wide settings singleton, a
//! `Settings` value is passed explicitly to whatever bootstraps a session, so
//! independent sessions (and tests) never share state.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LinguaError, LinguaResult};
use crate::language::{parse_language, Language};

/// Storage key used for the language preference unless configured otherwise.
pub const DEFAULT_PREFERENCE_KEY: &str = "uiLanguage";

/// Persistence medium configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// The backend: `"file"`, `"memory"`, or `"none"`.
    pub backend: String,
    /// File location for the `"file"` backend.
    pub location: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            location: None,
        }
    }
}

/// The complete set of lingua-rs settings.
///
/// # Examples
///
/// ```
/// use lingua_rs_core::language::Lang;
/// use lingua_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.default_language, "de");
/// assert_eq!(settings.preference_key, "uiLanguage");
/// assert_eq!(settings.language::<Lang>().unwrap(), Lang::De);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Internationalization ─────────────────────────────────────────

    /// Code of the language a session starts in.
    pub default_language: String,
    /// Optional catalog file (`.json` or `.toml`).
    pub catalog_path: Option<PathBuf>,

    // ── Persistence ──────────────────────────────────────────────────

    /// Key under which the language preference is persisted.
    pub preference_key: String,
    /// The persistence medium.
    pub storage: StorageSettings,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level or filter directive (e.g. "info", "lingua_rs=debug").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            default_language: "de".to_string(),
            catalog_path: None,
            preference_key: DEFAULT_PREFERENCE_KEY.to_string(),
            storage: StorageSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parses [`default_language`](Self::default_language) into `L`.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::UnsupportedLanguage`] if the code is not a
    /// member of `L`.
    pub fn language<L: Language>(&self) -> LinguaResult<L> {
        parse_language(&self.default_language)
    }

    /// Checks the settings against the language set `L`.
    pub fn validate<L: Language>(&self) -> LinguaResult<()> {
        self.language::<L>()?;
        if self.preference_key.is_empty() {
            return Err(LinguaError::ConfigurationError(
                "preference_key must not be empty".to_string(),
            ));
        }
        if self.storage.backend == "file" && self.storage.location.is_none() {
            return Err(LinguaError::ConfigurationError(
                "storage backend 'file' requires storage.location".to_string(),
            ));
        }
        Ok(())
    }
}
