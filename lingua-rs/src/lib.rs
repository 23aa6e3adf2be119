//! # lingua-rs
//!
//! Runtime UI localization: a fixed catalog of keyed texts, a two-step
//! fallback resolver, a language preference that survives restarts, and
//! change notifications so every consumer re-renders in the new language.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access. Depend on `lingua-rs` for the whole stack, or on individual
//! crates for finer-grained control.
//!
//! ## Example
//!
//! ```
//! use lingua_rs::prelude::*;
//!
//! let catalog = Catalog::builder()
//!     .entry("greet", [(Lang::En, "Hello"), (Lang::De, "Hallo")])
//!     .build()
//!     .unwrap();
//! let service = TranslationService::in_memory(catalog);
//!
//! assert_eq!(service.translate("greet"), "Hallo");
//! service.set_language(Lang::En);
//! assert_eq!(service.translate("greet"), "Hello");
//! assert_eq!(service.translate("unknownKey"), "unknownKey");
//! ```

/// Languages, catalog, resolver, settings, logging, and error types.
pub use lingua_rs_core as core;

/// Observer lists for change notifications.
#[cfg(feature = "signals")]
pub use lingua_rs_signals as signals;

/// Storage backends and the language preference store.
#[cfg(feature = "storage")]
pub use lingua_rs_storage as storage;

/// Session language state and the translation service.
#[cfg(feature = "runtime")]
pub use lingua_rs_runtime as runtime;

/// Test doubles and fixtures.
#[cfg(feature = "testing")]
pub use lingua_rs_test as test;

/// The types most applications need.
pub mod prelude {
    pub use lingua_rs_core::{
        parse_language, resolve, Catalog, Lang, Language, LinguaError, LinguaResult, Settings,
    };

    #[cfg(feature = "storage")]
    pub use lingua_rs_storage::{FileStorage, MemoryStorage, PreferenceStore, StorageBackend};

    #[cfg(feature = "runtime")]
    pub use lingua_rs_runtime::{
        LanguageChanged, LazyText, PreferenceContext, RestoreOutcome, Subscription,
        TranslationService,
    };
}
