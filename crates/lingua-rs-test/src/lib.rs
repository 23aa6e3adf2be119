//! # lingua-rs-test
//!
//! Testing utilities for lingua-rs. Provides storage doubles that record
//! writes, fail on demand, or hold reads, a three-language test set, and
//! shared catalog fixtures.
//!
//! ## Modules
//!
//! - [`recording`] - [`RecordingStorage`], an outbox of write attempts
//! - [`gated`] - [`GatedStorage`], reads held until released
//! - [`lang`] - [`TestLang`], English/German/French
//! - [`fixtures`] - Prebuilt catalogs

pub mod fixtures;
pub mod gated;
pub mod lang;
pub mod recording;

pub use gated::GatedStorage;
pub use lang::TestLang;
pub use recording::{RecordingStorage, WriteRecord};
