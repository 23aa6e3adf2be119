//! Catalog fixtures shared by the lingua-rs test suites.
//!
//! Keys and texts mirror a real settings and meeting-summary UI, including
//! entries that only exist in the fallback language.

use lingua_rs_core::{Catalog, Lang, LinguaResult};

use crate::lang::TestLang;

/// A key present only in German, so English lookups hit the fallback.
pub const GERMAN_ONLY_KEY: &str = "autoTranslateNoticeTitle";

/// A key no fixture catalog contains.
pub const UNKNOWN_KEY: &str = "missingKey";

/// The two-language UI catalog.
///
/// # Panics
///
/// Never in practice; the fixture is a valid catalog.
pub fn ui_catalog() -> Catalog<Lang> {
    Catalog::builder()
        .entry("greet", [(Lang::En, "Hello"), (Lang::De, "Hallo")])
        .entry("done", [(Lang::En, "Done"), (Lang::De, "Fertig")])
        .entry(
            "languageSettingsTitle",
            [(Lang::En, "Language Settings"), (Lang::De, "Spracheinstellungen")],
        )
        .entry(
            "languagePreferenceSavedTitle",
            [
                (Lang::En, "Language preference saved"),
                (Lang::De, "Spracheinstellung gespeichert"),
            ],
        )
        .entry(
            "meetingSummaryHeading",
            [(Lang::En, "Meeting Summary"), (Lang::De, "Besprechungsprotokoll")],
        )
        .entry("deleteLabel", [(Lang::En, "Delete"), (Lang::De, "Löschen")])
        .entry(GERMAN_ONLY_KEY, [(Lang::De, "Übersetzungsmodus aktiv")])
        .build()
        .expect("ui fixture catalog is valid")
}

/// The three-language catalog. French has text only for `greet`.
///
/// # Panics
///
/// Never in practice; the fixture is a valid catalog.
pub fn three_language_catalog() -> Catalog<TestLang> {
    Catalog::builder()
        .entry(
            "greet",
            [(TestLang::En, "Hello"), (TestLang::De, "Hallo"), (TestLang::Fr, "Bonjour")],
        )
        .entry("done", [(TestLang::En, "Done"), (TestLang::De, "Fertig")])
        .entry("keyPointsHeading", [(TestLang::De, "Kernpunkte")])
        .build()
        .expect("three-language fixture catalog is valid")
}

/// The UI catalog as a JSON document, for loader tests.
pub const UI_CATALOG_JSON: &str = r#"{
    "greet": { "en": "Hello", "de": "Hallo" },
    "done": { "en": "Done", "de": "Fertig" },
    "autoTranslateNoticeTitle": { "de": "Übersetzungsmodus aktiv" }
}"#;

/// Parses [`UI_CATALOG_JSON`].
pub fn ui_catalog_from_json() -> LinguaResult<Catalog<Lang>> {
    Catalog::from_json_str(UI_CATALOG_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_rs_core::resolve;

    #[test]
    fn test_fixtures_build() {
        assert!(ui_catalog().contains_key("greet"));
        assert!(!ui_catalog().contains_key(UNKNOWN_KEY));
        assert_eq!(three_language_catalog().len(), 3);
        assert_eq!(ui_catalog_from_json().unwrap().len(), 3);
    }

    #[test]
    fn test_german_only_key_needs_fallback() {
        let catalog = ui_catalog();
        assert_eq!(catalog.missing_translations(Lang::En), vec![GERMAN_ONLY_KEY]);
        assert_eq!(resolve(&catalog, GERMAN_ONLY_KEY, Lang::En), "Übersetzungsmodus aktiv");
    }
}
