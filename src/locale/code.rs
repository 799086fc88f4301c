//! Supported locale codes and the static lookup tables that map
//! language subtags and country codes onto them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A display language the site ships translations for.
///
/// The set is closed: every resolution produces exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    Ja,
    Ko,
    Zh,
    En,
}

impl LocaleCode {
    /// Every supported locale, in the order the site lists them.
    pub const ALL: [LocaleCode; 4] = [LocaleCode::Ja, LocaleCode::Ko, LocaleCode::Zh, LocaleCode::En];

    pub fn as_str(self) -> &'static str {
        match self {
            LocaleCode::Ja => "ja",
            LocaleCode::Ko => "ko",
            LocaleCode::Zh => "zh",
            LocaleCode::En => "en",
        }
    }

    /// Map a primary language subtag (`ko` from `ko-KR`) to a locale.
    ///
    /// Matching is ASCII case-insensitive. Returns `None` for languages the
    /// site has no translation for.
    pub fn from_language(subtag: &str) -> Option<Self> {
        let subtag = subtag.trim();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(subtag))
    }

    /// Map an ISO 3166 alpha-2 country code to a locale.
    ///
    /// Countries outside the table get English.
    pub fn from_country(country: &str) -> Self {
        match country.trim().to_ascii_uppercase().as_str() {
            "JP" => LocaleCode::Ja,
            "KR" => LocaleCode::Ko,
            "CN" | "TW" | "HK" | "MO" => LocaleCode::Zh,
            _ => LocaleCode::En,
        }
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no supported locale.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale code: {0:?}")]
pub struct UnknownLocale(pub String);

impl FromStr for LocaleCode {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_language(s).ok_or_else(|| UnknownLocale(s.to_string()))
    }
}
