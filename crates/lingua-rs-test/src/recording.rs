//! Write-capturing storage for testing persistence.
//!
//! [`RecordingStorage`] behaves like an in-memory medium but also keeps an
//! outbox of every write attempt, and can be switched into failing reads or
//! writes to exercise the degrade paths.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lingua_rs_storage::StorageBackend;
//! use lingua_rs_test::recording::RecordingStorage;
//!
//! # async fn example() {
//! let storage = RecordingStorage::new();
//! storage.set("uiLanguage", "en").await.unwrap();
//!
//! storage.assert_write_count(1);
//! assert_eq!(storage.last_write().unwrap().value, "en");
//! # }
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lingua_rs_core::{LinguaError, LinguaResult};
use lingua_rs_storage::StorageBackend;

/// One captured write attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    /// The key written.
    pub key: String,
    /// The value written.
    pub value: String,
    /// Whether the write was accepted.
    pub succeeded: bool,
}

#[derive(Debug, Default)]
struct State {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<WriteRecord>>,
    reads: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

/// An in-memory medium that records writes for test verification.
///
/// Thread-safe and cheap to clone; clones share values and the outbox, so a
/// clone can be handed to the code under test while the test keeps another.
#[derive(Debug, Clone, Default)]
pub struct RecordingStorage {
    state: Arc<State>,
}

impl RecordingStorage {
    /// Creates an empty medium.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a medium that already holds `value` under `key`.
    pub fn seeded(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.seed(key, value);
        storage
    }

    /// Stores a value directly, bypassing the outbox.
    pub fn seed(&self, key: &str, value: &str) {
        self.state
            .values
            .lock()
            .expect("RecordingStorage lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    /// Returns the current value under `key`, bypassing failure switches.
    pub fn value(&self, key: &str) -> Option<String> {
        self.state
            .values
            .lock()
            .expect("RecordingStorage lock poisoned")
            .get(key)
            .cloned()
    }

    /// Makes every subsequent read fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.state.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent write fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.state.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Returns all captured write attempts, oldest first.
    pub fn writes(&self) -> Vec<WriteRecord> {
        self.state
            .writes
            .lock()
            .expect("RecordingStorage lock poisoned")
            .clone()
    }

    /// Returns the number of write attempts.
    pub fn write_count(&self) -> usize {
        self.state
            .writes
            .lock()
            .expect("RecordingStorage lock poisoned")
            .len()
    }

    /// Returns the most recent write attempt, if any.
    pub fn last_write(&self) -> Option<WriteRecord> {
        self.state
            .writes
            .lock()
            .expect("RecordingStorage lock poisoned")
            .last()
            .cloned()
    }

    /// Returns the number of reads served (including failed ones).
    pub fn read_count(&self) -> usize {
        self.state.reads.load(Ordering::SeqCst)
    }

    /// Clears the outbox. Stored values are kept.
    pub fn clear_writes(&self) {
        self.state
            .writes
            .lock()
            .expect("RecordingStorage lock poisoned")
            .clear();
    }

    /// Asserts that exactly `expected` writes were attempted.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_write_count(&self, expected: usize) {
        let actual = self.write_count();
        assert_eq!(
            actual, expected,
            "Expected {expected} write(s), but {actual} were attempted: {:?}",
            self.writes()
        );
    }

    /// Asserts the sequence of written values, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the values differ.
    pub fn assert_written_values(&self, expected: &[&str]) {
        let actual: Vec<String> = self.writes().into_iter().map(|w| w.value).collect();
        assert_eq!(actual, expected, "Unexpected sequence of written values");
    }
}

#[async_trait]
impl StorageBackend for RecordingStorage {
    async fn get(&self, key: &str) -> LinguaResult<Option<String>> {
        self.state.reads.fetch_add(1, Ordering::SeqCst);
        if self.state.fail_reads.load(Ordering::SeqCst) {
            return Err(LinguaError::StorageError(format!("read of '{key}' refused")));
        }
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> LinguaResult<()> {
        let succeeded = !self.state.fail_writes.load(Ordering::SeqCst);
        self.state
            .writes
            .lock()
            .expect("RecordingStorage lock poisoned")
            .push(WriteRecord {
                key: key.to_string(),
                value: value.to_string(),
                succeeded,
            });

        if !succeeded {
            return Err(LinguaError::StorageError(format!("write of '{key}' refused")));
        }
        self.seed(key, value);
        Ok(())
    }
}
