//! Key resolution with a fixed fallback policy.
//!
//! Resolution is exactly two lookups followed by a literal degrade:
//!
//! 1. the requested language,
//! 2. [`Language::FALLBACK`],
//! 3. the key itself, verbatim.
//!
//! There is no third-language attempt. A missing key never fails and never
//! yields an empty string; the raw key showing up in the UI is the signal
//! for content authors.
//!
//! ```
//! use lingua_rs_core::catalog::Catalog;
//! use lingua_rs_core::language::Lang;
//! use lingua_rs_core::resolver::resolve;
//!
//! let catalog = Catalog::builder()
//!     .entry("greet", [(Lang::En, "Hello"), (Lang::De, "Hallo")])
//!     .entry("done", [(Lang::De, "Fertig")])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(resolve(&catalog, "greet", Lang::En), "Hello");
//! assert_eq!(resolve(&catalog, "done", Lang::En), "Fertig");
//! assert_eq!(resolve(&catalog, "missingKey", Lang::En), "missingKey");
//! ```

use crate::catalog::Catalog;
use crate::language::Language;

/// Which step of the lookup produced a resolved string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The entry had text for the requested language.
    Exact,
    /// The entry lacked the requested language; fallback text was used.
    Fallback,
    /// The key is not in the catalog; the key itself was returned.
    Missing,
}

/// Resolves `key` for `language`.
///
/// Pure and deterministic for a given catalog. The result borrows from the
/// catalog or, when the key is unknown, from `key` itself.
pub fn resolve<'a, L: Language>(catalog: &'a Catalog<L>, key: &'a str, language: L) -> &'a str {
    resolve_detailed(catalog, key, language).0
}

/// Like [`resolve`], also reporting which step produced the string.
pub fn resolve_detailed<'a, L: Language>(
    catalog: &'a Catalog<L>,
    key: &'a str,
    language: L,
) -> (&'a str, Resolution) {
    let Some(entry) = catalog.get(key) else {
        return (key, Resolution::Missing);
    };
    if let Some(text) = entry.text(language) {
        return (text, Resolution::Exact);
    }
    // Built catalogs always carry fallback text; the literal key covers
    // anything else without a second code path.
    entry
        .text(L::FALLBACK)
        .map_or((key, Resolution::Missing), |text| (text, Resolution::Fallback))
}
