//! # lingua-rs-storage
//!
//! Persistence for the language preference. The [`StorageBackend`] trait is
//! the seam between lingua-rs and whatever medium the host provides;
//! [`PreferenceStore`] layers the failure-tolerant load/save rules on top.
//!
//! ## Modules
//!
//! - [`backend`] - The storage trait and the memory, file, and unavailable media
//! - [`preference`] - Loading and saving the preferred language

pub mod backend;
pub mod preference;

pub use backend::{from_settings, FileStorage, MemoryStorage, StorageBackend, UnavailableStorage};
pub use preference::PreferenceStore;
