//! # lingua-rs-runtime
//!
//! The live side of lingua-rs: one [`PreferenceContext`] per session holds
//! the active language, restores it once from storage, and mirrors every
//! explicit change back; [`TranslationService`] resolves catalog keys
//! against it and lets consumers subscribe to changes.
//!
//! ## Modules
//!
//! - [`context`] - Active language, restore, persistence, and change notifications
//! - [`service`] - `translate`, `set_language`, `subscribe`
//! - [`lazy`] - Translations deferred until display

pub mod context;
pub mod lazy;
pub mod service;

pub use context::{LanguageChanged, PreferenceContext, RestoreOutcome};
pub use lingua_rs_signals::Subscription;
pub use lazy::LazyText;
pub use service::TranslationService;
