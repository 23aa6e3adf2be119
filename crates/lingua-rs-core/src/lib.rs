//! # lingua-rs-core
//!
//! Foundation types for the lingua-rs localization stack: supported language
//! codes, the immutable translation catalog, the fallback resolver, settings,
//! logging, and error types. This crate performs no I/O beyond reading
//! configuration and catalog files.
//!
//! ## Modules
//!
//! - [`language`] - The [`Language`] trait and the shipped [`Lang`] enum
//! - [`catalog`] - Immutable key → per-language text table
//! - [`resolver`] - Two-step lookup with literal-key degrade
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Runtime configuration
//! - [`settings_loader`] - TOML/JSON/environment loading for [`Settings`]
//! - [`logging`] - Tracing-based logging integration

pub mod catalog;
pub mod error;
pub mod language;
pub mod logging;
pub mod resolver;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use catalog::{Catalog, CatalogBuilder, CatalogEntry};
pub use error::{LinguaError, LinguaResult};
pub use language::{parse_language, Lang, Language};
pub use resolver::{resolve, resolve_detailed, Resolution};
pub use settings::{Settings, StorageSettings};
