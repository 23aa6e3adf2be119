//! Supported language codes.
//!
//! A set of supported languages is a closed enum implementing [`Language`].
//! The trait carries the whole static policy for that set: every member, the
//! fallback language the resolver tries second, and the system default used
//! when the host application does not pick one. Everything downstream is
//! generic over it, so adding a language means adding a variant and nothing
//! else.
//!
//! [`Lang`] is the set shipped with the crate (`en`, `de`).

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LinguaError, LinguaResult};

/// A closed set of supported UI languages.
///
/// # Examples
///
/// ```
/// use lingua_rs_core::language::{Lang, Language};
///
/// assert_eq!(Lang::from_code("en"), Some(Lang::En));
/// assert_eq!(Lang::from_code("EN"), None);
/// assert_eq!(Lang::FALLBACK.code(), "de");
/// ```
pub trait Language: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every supported language, in presentation order.
    const ALL: &'static [Self];

    /// The single language attempted when the requested one has no text.
    const FALLBACK: Self;

    /// The language a session starts with when none is supplied.
    const DEFAULT: Self;

    /// Stable lowercase code, used in catalog documents and persisted data.
    fn code(self) -> &'static str;

    /// Parses a code into a supported language.
    ///
    /// Matching is exact and case-sensitive; anything else is `None`.
    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|lang| lang.code() == code)
    }
}

/// Parses `code` at an input boundary, rejecting unsupported values.
///
/// # Examples
///
/// ```
/// use lingua_rs_core::language::{parse_language, Lang};
///
/// assert_eq!(parse_language::<Lang>("de").unwrap(), Lang::De);
/// assert!(parse_language::<Lang>("xx").is_err());
/// ```
pub fn parse_language<L: Language>(code: &str) -> LinguaResult<L> {
    L::from_code(code).ok_or_else(|| LinguaError::UnsupportedLanguage(code.to_string()))
}

/// Languages supported out of the box.
///
/// German is both the fallback and the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    /// English.
    En,
    /// German.
    De,
}

impl Lang {
    /// The language's name written in that language, for pickers.
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::De => "Deutsch",
        }
    }
}

impl Language for Lang {
    const ALL: &'static [Self] = &[Self::En, Self::De];
    const FALLBACK: Self = Self::De;
    const DEFAULT: Self = Self::De;

    fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = LinguaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_language(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for lang in Lang::ALL {
            assert_eq!(Lang::from_code(lang.code()), Some(*lang));
        }
    }

    #[test]
    fn test_from_code_rejects_unknown() {
        assert_eq!(Lang::from_code("fr"), None);
        assert_eq!(Lang::from_code(""), None);
        assert_eq!(Lang::from_code("De"), None);
        assert_eq!(Lang::from_code(" de"), None);
    }

    #[test]
    fn test_fallback_and_default() {
        assert_eq!(Lang::FALLBACK, Lang::De);
        assert_eq!(Lang::DEFAULT, Lang::De);
        assert!(Lang::ALL.contains(&Lang::FALLBACK));
    }

    #[test]
    fn test_parse_language_error() {
        let err = parse_language::<Lang>("klingon").unwrap_err();
        assert!(matches!(err, LinguaError::UnsupportedLanguage(code) if code == "klingon"));
    }

    #[test]
    fn test_from_str_and_display() {
        let lang: Lang = "en".parse().unwrap();
        assert_eq!(lang, Lang::En);
        assert_eq!(lang.to_string(), "en");
        assert!("english".parse::<Lang>().is_err());
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Lang::De).unwrap(), "\"de\"");
        let lang: Lang = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Lang::En);
        assert!(serde_json::from_str::<Lang>("\"fr\"").is_err());
    }

    #[test]
    fn test_native_names() {
        assert_eq!(Lang::En.native_name(), "English");
        assert_eq!(Lang::De.native_name(), "Deutsch");
    }
}
