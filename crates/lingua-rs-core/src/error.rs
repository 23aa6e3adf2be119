//! Core error types for lingua-rs.
//!
//! Nothing in this enum is ever surfaced by `translate` or by the language
//! setter: those degrade instead of failing. [`LinguaError`] covers the
//! places where failing is the right answer (building a catalog, parsing
//! configuration, validating a language code at an input boundary) and the
//! internal results of persistence backends, which the preference layer
//! logs and then discards.

use thiserror::Error;

/// The primary error type for lingua-rs.
#[derive(Error, Debug)]
pub enum LinguaError {
    // ── Language codes ───────────────────────────────────────────────

    /// A language code is not a member of the supported set.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    // ── Catalog ──────────────────────────────────────────────────────

    /// A catalog entry has no text for the designated fallback language.
    #[error("Catalog entry '{key}' has no text for fallback language '{fallback}'")]
    MissingFallback {
        /// The offending translation key.
        key: String,
        /// Code of the fallback language.
        fallback: &'static str,
    },

    /// The same key was declared twice while building a catalog.
    #[error("Duplicate catalog key: {0}")]
    DuplicateKey(String),

    /// A catalog document could not be parsed.
    #[error("Catalog parse error: {0}")]
    CatalogParse(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Persistence ──────────────────────────────────────────────────

    /// The persistence medium cannot be reached in this environment.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The persistence medium rejected a read or write.
    #[error("Storage error: {0}")]
    StorageError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LinguaError {
    /// Returns `true` for failures of the persistence medium.
    ///
    /// These are the only errors the preference layer expects at runtime;
    /// they are logged and swallowed rather than propagated.
    pub const fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::StorageUnavailable(_) | Self::StorageError(_) | Self::IoError(_)
        )
    }
}

/// A convenience type alias for `Result<T, LinguaError>`.
pub type LinguaResult<T> = Result<T, LinguaError>;
