//! The configured locale resolver.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{LocaleConfig, Strategy};
use crate::geo::CountryLookup;
use crate::locale::accept_language::{first_supported, parse_accept_language};
use crate::locale::geo_ip::{resolve_client_ip, GeoSettings};
use crate::locale::{Evidence, FallbackReason, LocaleCode, Resolution};

/// Signals extracted from one request.
#[derive(Debug, Clone, Copy)]
pub struct RequestSignal<'a> {
    /// Raw `Accept-Language` bytes, if the header was sent.
    pub accept_language: Option<&'a [u8]>,
    /// Client address chosen from forwarding headers.
    pub client_ip: &'a str,
}

/// Maps a request signal to a supported locale. Never fails: every error
/// path becomes a [`Resolution::Fallback`].
pub struct LocaleResolver {
    strategy: Strategy,
    default_locale: LocaleCode,
    geo: GeoSettings,
    lookup: Arc<dyn CountryLookup>,
}

impl LocaleResolver {
    pub fn new(strategy: Strategy, default_locale: LocaleCode, geo: GeoSettings, lookup: Arc<dyn CountryLookup>) -> Self {
        Self {
            strategy,
            default_locale,
            geo,
            lookup,
        }
    }

    pub fn from_config(config: &LocaleConfig, lookup: Arc<dyn CountryLookup>) -> Self {
        Self::new(
            config.strategy,
            config.default_locale,
            GeoSettings {
                local_locale: config.local_locale,
                local_country: config.local_country.clone(),
                international_default: config.international_default,
            },
            lookup,
        )
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Locale used when the active strategy cannot say anything.
    pub fn safe_default(&self) -> LocaleCode {
        match self.strategy {
            Strategy::AcceptLanguage => self.default_locale,
            Strategy::GeoIp => self.geo.international_default,
        }
    }

    pub async fn resolve(&self, signal: &RequestSignal<'_>) -> Resolution {
        match self.strategy {
            Strategy::AcceptLanguage => self.resolve_header(signal.accept_language),
            Strategy::GeoIp => resolve_client_ip(signal.client_ip, &self.geo, self.lookup.as_ref()).await,
        }
    }

    /// Like [`resolve`](Self::resolve), but gives up after `deadline`.
    ///
    /// Only the geo strategy awaits anything, so expiry is reported as a
    /// country miss against the safe default.
    pub async fn resolve_within(&self, signal: &RequestSignal<'_>, deadline: Duration) -> Resolution {
        match tokio::time::timeout(deadline, self.resolve(signal)).await {
            Ok(resolution) => resolution,
            Err(_) => {
                tracing::warn!(
                    strategy = self.strategy.as_str(),
                    deadline_ms = deadline.as_millis() as u64,
                    "Locale resolution exceeded the request deadline"
                );
                Resolution::fallback(
                    self.safe_default(),
                    FallbackReason::CountryNotFound,
                    Evidence {
                        ip: Some(signal.client_ip.trim().to_string()),
                        ..Evidence::default()
                    },
                )
            }
        }
    }

    /// Header strategy; synchronous since it only parses.
    pub fn resolve_header(&self, raw: Option<&[u8]>) -> Resolution {
        let raw = raw.unwrap_or_default();
        let header = match std::str::from_utf8(raw) {
            Ok(header) if header.bytes().all(is_header_char) => header,
            _ => {
                tracing::debug!(bytes = raw.len(), "Accept-Language is not visible ASCII");
                return Resolution::fallback(
                    self.default_locale,
                    FallbackReason::Malformed("Accept-Language is not visible ASCII".to_string()),
                    Evidence::default(),
                );
            }
        };

        let preferences = parse_accept_language(header);
        let evidence = Evidence {
            accept_language: Some(header.to_string()),
            languages: Some(preferences.iter().map(|p| p.language.clone()).collect()),
            ..Evidence::default()
        };

        if header.trim().is_empty() {
            return Resolution::fallback(self.default_locale, FallbackReason::EmptySignal, evidence);
        }

        match first_supported(&preferences) {
            Some(locale) => Resolution::detected(locale, evidence),
            None => Resolution::fallback(self.default_locale, FallbackReason::NoSupportedLanguage, evidence),
        }
    }
}

/// Visible ASCII plus space and tab.
fn is_header_char(b: u8) -> bool {
    b == b'\t' || (b' '..=b'~').contains(&b)
}
