//! Resolution outcomes.
//!
//! A resolution is either a genuine detection or a fallback. Fallbacks carry
//! the reason so callers can tell a normal miss from a recovered failure.

use crate::locale::LocaleCode;

/// Request facts gathered while resolving, echoed back for diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evidence {
    /// Raw `Accept-Language` value (header strategy).
    pub accept_language: Option<String>,
    /// Primary subtags in precedence order (header strategy).
    pub languages: Option<Vec<String>>,
    /// Client address the lookup ran against (geo strategy).
    pub ip: Option<String>,
    /// Country the address resolved to (geo strategy).
    pub country: Option<String>,
}

/// Why the resolver fell back to a default locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No signal was sent at all.
    EmptySignal,
    /// Preferences were present but none is supported.
    NoSupportedLanguage,
    /// Loopback or private address; no geographic inference made.
    LocalAddress,
    /// The country lookup had no answer (including timeouts).
    CountryNotFound,
    /// The signal could not be parsed.
    Malformed(String),
    /// An external dependency failed.
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Detected {
        locale: LocaleCode,
        evidence: Evidence,
    },
    Fallback {
        locale: LocaleCode,
        reason: FallbackReason,
        evidence: Evidence,
    },
}

impl Resolution {
    pub fn detected(locale: LocaleCode, evidence: Evidence) -> Self {
        Resolution::Detected { locale, evidence }
    }

    pub fn fallback(locale: LocaleCode, reason: FallbackReason, evidence: Evidence) -> Self {
        Resolution::Fallback { locale, reason, evidence }
    }

    pub fn locale(&self) -> LocaleCode {
        match self {
            Resolution::Detected { locale, .. } | Resolution::Fallback { locale, .. } => *locale,
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, Resolution::Detected { .. })
    }

    pub fn evidence(&self) -> &Evidence {
        match self {
            Resolution::Detected { evidence, .. } | Resolution::Fallback { evidence, .. } => evidence,
        }
    }

    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            Resolution::Detected { .. } => None,
            Resolution::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Diagnostic message for recovered parse or dependency failures.
    pub fn error(&self) -> Option<&str> {
        match self.reason()? {
            FallbackReason::Malformed(msg) | FallbackReason::Unavailable(msg) => Some(msg),
            _ => None,
        }
    }

    /// True when an external dependency failed; surfaced as HTTP 500.
    pub fn is_failure(&self) -> bool {
        matches!(self.reason(), Some(FallbackReason::Unavailable(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let hit = Resolution::detected(LocaleCode::Ko, Evidence::default());
        assert!(hit.is_detected());
        assert_eq!(hit.locale(), LocaleCode::Ko);
        assert_eq!(hit.reason(), None);
        assert!(!hit.is_failure());

        let miss = Resolution::fallback(
            LocaleCode::En,
            FallbackReason::Unavailable("geo service returned status 503".into()),
            Evidence::default(),
        );
        assert!(!miss.is_detected());
        assert!(miss.is_failure());
        assert_eq!(miss.error(), Some("geo service returned status 503"));
    }

    #[test]
    fn malformed_is_not_a_failure() {
        let res = Resolution::fallback(
            LocaleCode::En,
            FallbackReason::Malformed("bad header".into()),
            Evidence::default(),
        );
        assert!(!res.is_failure());
        assert_eq!(res.error(), Some("bad header"));
    }

    #[test]
    fn plain_misses_carry_no_error() {
        let res = Resolution::fallback(LocaleCode::Ja, FallbackReason::LocalAddress, Evidence::default());
        assert_eq!(res.error(), None);
    }
}
