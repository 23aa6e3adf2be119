//! A three-language set for exercising fallback beyond two languages.

use std::fmt;

use lingua_rs_core::Language;
use serde::{Deserialize, Serialize};

/// English, German, and French, with German as fallback and default.
///
/// French is deliberately sparse in [`crate::fixtures`], so tests can check
/// that a missing French text falls back to German and never to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestLang {
    /// English.
    En,
    /// German.
    De,
    /// French.
    Fr,
}

impl Language for TestLang {
    const ALL: &'static [Self] = &[Self::En, Self::De, Self::Fr];
    const FALLBACK: Self = Self::De;
    const DEFAULT: Self = Self::De;

    fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Fr => "fr",
        }
    }
}

impl fmt::Display for TestLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
