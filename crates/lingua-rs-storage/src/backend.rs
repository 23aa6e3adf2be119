//! Persistence media for the language preference.
//!
//! This module provides the [`StorageBackend`] trait, a minimal async
//! key-value capability, and the built-in media:
//!
//! - [`MemoryStorage`] - Shared in-memory map (tests, ephemeral sessions)
//! - [`FileStorage`] - A single JSON object file on disk
//! - [`UnavailableStorage`] - No medium at all; reads are absent, writes fail
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lingua_rs_storage::backend::{MemoryStorage, StorageBackend};
//!
//! async fn example() {
//!     let storage = MemoryStorage::new();
//!     storage.set("uiLanguage", "en").await.unwrap();
//!     assert_eq!(storage.get("uiLanguage").await.unwrap().as_deref(), Some("en"));
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use lingua_rs_core::{LinguaError, LinguaResult, StorageSettings};

/// A key-value persistence medium.
///
/// Absence is a normal answer: `get` returns `Ok(None)` for missing keys and
/// for media that have nothing to offer in the current environment. `Err` is
/// reserved for genuine failures (I/O, corrupt data, rejected writes).
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> LinguaResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> LinguaResult<()>;
}

/// A shared in-memory medium.
///
/// Clones share the same map, which makes a clone a convenient stand-in for
/// "the same medium, seen by a later session".
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    store: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates a new empty medium.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn get(&self, key: &str) -> LinguaResult<Option<String>> {
        Ok(self.store.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> LinguaResult<()> {
        self.store
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Distinguishes temporary files written by this process.
static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A medium backed by one JSON object file, `{ "key": "value", ... }`.
///
/// A missing file reads as empty. Writes rewrite the whole document through
/// a uniquely named sibling temporary file and a rename, creating parent
/// directories as needed. Writers through the same `FileStorage` (and its
/// clones) are serialized; separate instances over one path never share a
/// temporary file, and the last rename wins.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileStorage {
    /// Creates a medium stored at `path`. Nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The document location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> LinguaResult<HashMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(data) if data.iter().all(u8::is_ascii_whitespace) => Ok(HashMap::new()),
            Ok(data) => serde_json::from_slice(&data).map_err(|e| {
                LinguaError::SerializationError(format!(
                    "'{}' is not a JSON object of strings: {e}",
                    self.path.display()
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(LinguaError::IoError(e)),
        }
    }

    /// A fresh temporary path next to the document, unique per process and call.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        let n = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        name.push(format!(".{}.{n}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StorageBackend for FileStorage {
    async fn get(&self, key: &str) -> LinguaResult<Option<String>> {
        Ok(self.read_document().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> LinguaResult<()> {
        let _guard = self.write_lock.lock().await;

        // A corrupt document is replaced rather than blocking every future write.
        let mut document = match self.read_document().await {
            Ok(document) => document,
            Err(LinguaError::SerializationError(msg)) => {
                tracing::warn!(path = %self.path.display(), error = %msg, "replacing unreadable preference file");
                HashMap::new()
            }
            Err(e) => return Err(e),
        };
        document.insert(key.to_string(), value.to_string());

        let data = serde_json::to_vec_pretty(&document)
            .map_err(|e| LinguaError::SerializationError(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let temp = self.temp_path();
        let written = match tokio::fs::write(&temp, &data).await {
            Ok(()) => tokio::fs::rename(&temp, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            tokio::fs::remove_file(&temp).await.ok();
            return Err(LinguaError::IoError(e));
        }
        Ok(())
    }
}

/// The absence of any medium, e.g. a headless or non-interactive run.
///
/// Reads are silently absent; writes fail with
/// [`LinguaError::StorageUnavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

#[async_trait]
impl StorageBackend for UnavailableStorage {
    async fn get(&self, _key: &str) -> LinguaResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, key: &str, _value: &str) -> LinguaResult<()> {
        Err(LinguaError::StorageUnavailable(format!(
            "no persistence medium for '{key}'"
        )))
    }
}

/// Builds the medium described by `settings`.
///
/// # Errors
///
/// Returns [`LinguaError::ConfigurationError`] for an unknown backend name
/// or a `"file"` backend without a location.
pub fn from_settings(settings: &StorageSettings) -> LinguaResult<Arc<dyn StorageBackend>> {
    match settings.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryStorage::new())),
        "none" | "unavailable" => Ok(Arc::new(UnavailableStorage)),
        "file" => {
            let location = settings.location.clone().ok_or_else(|| {
                LinguaError::ConfigurationError(
                    "storage backend 'file' requires storage.location".to_string(),
                )
            })?;
            Ok(Arc::new(FileStorage::new(location)))
        }
        other => Err(LinguaError::ConfigurationError(format!(
            "unknown storage backend '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── MemoryStorage ────────────────────────────────────────────────

    #[tokio::test]
    async fn test_memory_get_set() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty().await);
        storage.set("uiLanguage", "en").await.unwrap();

        let value = storage.get("uiLanguage").await.unwrap();
        assert_eq!(value.as_deref(), Some("en"));
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_get_missing() {
        let storage = MemoryStorage::new();
        assert!(storage.get("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_clones_share_data() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.set("k", "v").await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_memory_overwrite() {
        let storage = MemoryStorage::new();
        storage.set("k", "de").await.unwrap();
        storage.set("k", "en").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("en"));
    }

    // ── FileStorage ──────────────────────────────────────────────────

    #[tokio::test]
    async fn test_file_missing_reads_absent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("prefs.json"));
        assert!(storage.get("uiLanguage").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_set_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("prefs.json");
        let storage = FileStorage::new(&path);

        storage.set("uiLanguage", "en").await.unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
        assert_eq!(storage.get("uiLanguage").await.unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_temp_paths_are_unique() {
        let storage = FileStorage::new("/state/prefs.json");
        let a = storage.temp_path();
        let b = storage.clone().temp_path();
        let c = FileStorage::new("/state/prefs.json").temp_path();

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_eq!(a.parent(), Some(Path::new("/state")));
        assert!(a.file_name().unwrap().to_string_lossy().starts_with("prefs.json."));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_separate_instances_write_same_file_concurrently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut writers = Vec::new();
        for session in 0..4 {
            let storage = FileStorage::new(&path);
            writers.push(tokio::spawn(async move {
                for round in 0..10 {
                    let value = if (session + round) % 2 == 0 { "en" } else { "de" };
                    storage.set("uiLanguage", value).await?;
                }
                Ok::<(), LinguaError>(())
            }));
        }
        for writer in writers {
            writer.await.unwrap().unwrap();
        }

        let value = FileStorage::new(&path).get("uiLanguage").await.unwrap();
        assert!(matches!(value.as_deref(), Some("en" | "de")));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_file_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let storage = FileStorage::new(&path);
        storage.set("uiLanguage", "de").await.unwrap();

        assert_eq!(storage.get("theme").await.unwrap().as_deref(), Some("dark"));
        assert_eq!(storage.get("uiLanguage").await.unwrap().as_deref(), Some("de"));
    }

    #[tokio::test]
    async fn test_file_visible_to_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        FileStorage::new(&path).set("uiLanguage", "en").await.unwrap();
        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("uiLanguage").await.unwrap().as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn test_file_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        let storage = FileStorage::new(&path);

        assert!(matches!(
            storage.get("uiLanguage").await,
            Err(LinguaError::SerializationError(_))
        ));

        // Writing recovers the file.
        storage.set("uiLanguage", "de").await.unwrap();
        assert_eq!(storage.get("uiLanguage").await.unwrap().as_deref(), Some("de"));
    }

    #[tokio::test]
    async fn test_file_empty_document_reads_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "\n").unwrap();
        let storage = FileStorage::new(&path);
        assert!(storage.get("uiLanguage").await.unwrap().is_none());
    }

    // ── UnavailableStorage ───────────────────────────────────────────

    #[tokio::test]
    async fn test_unavailable_storage() {
        let storage = UnavailableStorage;
        assert!(storage.get("uiLanguage").await.unwrap().is_none());
        let err = storage.set("uiLanguage", "en").await.unwrap_err();
        assert!(matches!(err, LinguaError::StorageUnavailable(_)));
        assert!(err.is_storage());
    }

    // ── from_settings ────────────────────────────────────────────────

    #[tokio::test]
    async fn test_from_settings() {
        let memory = from_settings(&StorageSettings::default()).unwrap();
        memory.set("k", "v").await.unwrap();

        let none = from_settings(&StorageSettings {
            backend: "none".to_string(),
            location: None,
        })
        .unwrap();
        assert!(none.set("k", "v").await.is_err());

        let dir = tempfile::tempdir().unwrap();
        let file = from_settings(&StorageSettings {
            backend: "file".to_string(),
            location: Some(dir.path().join("prefs.json")),
        })
        .unwrap();
        file.set("k", "v").await.unwrap();
        assert_eq!(file.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_from_settings_errors() {
        let missing_location = StorageSettings {
            backend: "file".to_string(),
            location: None,
        };
        assert!(matches!(
            from_settings(&missing_location),
            Err(LinguaError::ConfigurationError(_))
        ));

        let unknown = StorageSettings {
            backend: "cloud".to_string(),
            location: None,
        };
        assert!(matches!(
            from_settings(&unknown),
            Err(LinguaError::ConfigurationError(_))
        ));
    }
}
