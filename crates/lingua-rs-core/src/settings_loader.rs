//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `LINGUA_DEBUG` | `debug` |
//! | `LINGUA_LOG_LEVEL` | `log_level` |
//! | `LINGUA_DEFAULT_LANGUAGE` | `default_language` |
//! | `LINGUA_PREFERENCE_KEY` | `preference_key` |
//! | `LINGUA_CATALOG_PATH` | `catalog_path` |
//! | `LINGUA_STORAGE_BACKEND` | `storage.backend` |
//! | `LINGUA_STORAGE_LOCATION` | `storage.location` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use lingua_rs_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/lingua.toml").unwrap();
//! ```

use std::path::{Path, PathBuf};

use crate::error::LinguaError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, LinguaError> {
    // Go through serde_json::Value so the document can be deep-merged over
    // the serialized defaults.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| LinguaError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, LinguaError> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, LinguaError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, LinguaError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| LinguaError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, LinguaError> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, LinguaError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// `LINGUA_DEBUG` accepts "true"/"1"/"yes" (case-insensitive) as true and
/// anything else as false. An empty `LINGUA_CATALOG_PATH` or
/// `LINGUA_STORAGE_LOCATION` clears the path.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("LINGUA_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("LINGUA_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("LINGUA_DEFAULT_LANGUAGE") {
        settings.default_language = val.trim().to_string();
    }

    if let Ok(val) = std::env::var("LINGUA_PREFERENCE_KEY") {
        settings.preference_key = val;
    }

    if let Ok(val) = std::env::var("LINGUA_CATALOG_PATH") {
        settings.catalog_path = optional_path(&val);
    }

    if let Ok(val) = std::env::var("LINGUA_STORAGE_BACKEND") {
        settings.storage.backend = val.trim().to_lowercase();
    }

    if let Ok(val) = std::env::var("LINGUA_STORAGE_LOCATION") {
        settings.storage.location = optional_path(&val);
    }
}

// ============================================================
// Helpers
// ============================================================

fn optional_path(val: &str) -> Option<PathBuf> {
    let trimmed = val.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

fn read_config(path: &Path, format: &str) -> Result<String, LinguaError> {
    std::fs::read_to_string(path).map_err(|e| {
        LinguaError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(value: serde_json::Value, format: &str) -> Result<Settings, LinguaError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        LinguaError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        LinguaError::ConfigurationError(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
pub(crate) fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            default_language = "en"
            debug = false
            preference_key = "appLanguage"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.default_language, "en");
        assert!(!settings.debug);
        assert_eq!(settings.preference_key, "appLanguage");
        // Defaults preserved
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.storage.backend, "memory");
    }

    #[test]
    fn test_from_toml_str_storage_table() {
        let toml = r#"
            [storage]
            backend = "file"
            location = "/var/lib/app/prefs.json"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.storage.backend, "file");
        assert_eq!(
            settings.storage.location,
            Some(PathBuf::from("/var/lib/app/prefs.json"))
        );
        assert_eq!(settings.default_language, "de");
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("[[invalid toml content");
        assert!(matches!(result, Err(LinguaError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str("debug = \"sometimes\"");
        assert!(result.is_err());
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{
            "default_language": "en",
            "log_level": "debug",
            "catalog_path": "i18n/catalog.json"
        }"#;

        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.default_language, "en");
        assert_eq!(settings.log_level, "debug");
        assert_eq!(
            settings.catalog_path,
            Some(PathBuf::from("i18n/catalog.json"))
        );
        assert!(settings.debug);
    }

    #[test]
    fn test_from_json_str_partial_storage() {
        let json = r#"{ "storage": { "backend": "none" } }"#;
        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.storage.backend, "none");
        assert!(settings.storage.location.is_none());
    }

    #[test]
    fn test_from_json_str_invalid() {
        let result = from_json_str("{invalid json");
        assert!(result.is_err());
    }

    // ── File loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lingua.toml");
        std::fs::write(&path, "default_language = \"en\"\ndebug = false\n").unwrap();

        let settings = from_toml_file(&path).unwrap();
        assert_eq!(settings.default_language, "en");
        assert!(!settings.debug);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lingua.json");
        std::fs::write(&path, r#"{"preference_key": "lang", "debug": false}"#).unwrap();

        let settings = from_json_file(&path).unwrap();
        assert_eq!(settings.preference_key, "lang");
        assert!(!settings.debug);
    }

    #[test]
    fn test_from_file_missing() {
        assert!(from_toml_file("/nonexistent/path/lingua.toml").is_err());
        assert!(from_json_file("/nonexistent/path/lingua.json").is_err());
    }

    // ── Environment variable overrides ──────────────────────────────

    #[test]
    fn test_apply_env_overrides_storage() {
        let mut settings = Settings::default();
        std::env::set_var("LINGUA_STORAGE_BACKEND", " File ");
        std::env::set_var("LINGUA_STORAGE_LOCATION", "/tmp/lingua-prefs.json");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.storage.backend, "file");
        assert_eq!(
            settings.storage.location,
            Some(PathBuf::from("/tmp/lingua-prefs.json"))
        );
        std::env::remove_var("LINGUA_STORAGE_BACKEND");
        std::env::remove_var("LINGUA_STORAGE_LOCATION");
    }

    #[test]
    fn test_apply_env_overrides_empty_catalog_path_clears() {
        let mut settings = Settings {
            catalog_path: Some(PathBuf::from("catalog.json")),
            ..Settings::default()
        };
        std::env::set_var("LINGUA_CATALOG_PATH", "");
        apply_env_overrides(&mut settings);
        assert!(settings.catalog_path.is_none());
        std::env::remove_var("LINGUA_CATALOG_PATH");
    }

    #[test]
    fn test_apply_env_overrides_preference_key() {
        let mut settings = Settings::default();
        std::env::set_var("LINGUA_PREFERENCE_KEY", "myLanguage");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.preference_key, "myLanguage");
        std::env::remove_var("LINGUA_PREFERENCE_KEY");
    }

    #[test]
    fn test_toml_with_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lingua_env.toml");
        std::fs::write(&path, "default_language = \"de\"\nlog_level = \"warn\"\n").unwrap();

        std::env::set_var("LINGUA_DEFAULT_LANGUAGE", "en");
        std::env::set_var("LINGUA_DEBUG", "no");

        let settings = from_toml_file_with_env(&path).unwrap();
        assert_eq!(settings.default_language, "en");
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "warn");

        std::env::remove_var("LINGUA_DEFAULT_LANGUAGE");
        std::env::remove_var("LINGUA_DEBUG");
    }

    // ── merge_json helper ───────────────────────────────────────────

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"outer": {"a": 1, "b": 2}, "c": 3});
        let over = serde_json::json!({"outer": {"b": 4}});
        let merged = merge_json(base, over);
        assert_eq!(merged["outer"]["a"], 1);
        assert_eq!(merged["outer"]["b"], 4);
        assert_eq!(merged["c"], 3);
    }

    #[test]
    fn test_toml_to_json() {
        let toml_val: toml::Value = toml::from_str(
            r#"
            name = "test"
            count = 42
            flag = true
            [nested]
            key = "value"
        "#,
        )
        .unwrap();

        let json = toml_to_json(toml_val);
        assert_eq!(json["name"], "test");
        assert_eq!(json["count"], 42);
        assert_eq!(json["flag"], true);
        assert_eq!(json["nested"]["key"], "value");
    }
}
