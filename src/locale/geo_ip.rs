//! Client-address strategy.

use std::net::{IpAddr, SocketAddr};

use crate::geo::{CountryLookup, LookupError};
use crate::locale::{Evidence, FallbackReason, LocaleCode, Resolution};

/// Defaults used by the address strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoSettings {
    /// Locale for loopback and private-range clients.
    pub local_locale: LocaleCode,
    /// Country reported for loopback and private-range clients.
    pub local_country: String,
    /// Locale when no country could be determined.
    pub international_default: LocaleCode,
}

impl Default for GeoSettings {
    fn default() -> Self {
        Self {
            local_locale: LocaleCode::Ja,
            local_country: "JP".to_string(),
            international_default: LocaleCode::En,
        }
    }
}

/// Loopback, unspecified, private and link-local ranges (IPv4 and IPv6,
/// including IPv4-mapped IPv6).
pub fn is_local_address(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_loopback() || v4.is_private() || v4.is_unspecified() || v4.is_link_local(),
        IpAddr::V6(v6) => {
            if let Some(v4) = v6.to_ipv4_mapped() {
                return is_local_address(IpAddr::V4(v4));
            }
            let first = v6.segments()[0];
            v6.is_loopback()
                || v6.is_unspecified()
                || (first & 0xfe00) == 0xfc00 // unique local fc00::/7
                || (first & 0xffc0) == 0xfe80 // link local fe80::/10
        }
    }
}

/// Parse a forwarded address, tolerating a trailing port (`1.2.3.4:5678`,
/// `[::1]:80`).
pub fn parse_client_ip(raw: &str) -> Option<IpAddr> {
    let raw = raw.trim();
    raw.parse::<IpAddr>()
        .ok()
        .or_else(|| raw.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
}

/// Resolve a locale from the client address.
pub async fn resolve_client_ip(raw: &str, settings: &GeoSettings, lookup: &dyn CountryLookup) -> Resolution {
    let mut evidence = Evidence {
        ip: Some(raw.trim().to_string()),
        ..Evidence::default()
    };

    let Some(ip) = parse_client_ip(raw) else {
        tracing::debug!(ip = %raw, "Client address is not a valid IP");
        return Resolution::fallback(
            settings.international_default,
            FallbackReason::Malformed(format!("invalid client address: {:?}", raw.trim())),
            evidence,
        );
    };

    if is_local_address(ip) {
        evidence.country = Some(settings.local_country.clone());
        return Resolution::fallback(settings.local_locale, FallbackReason::LocalAddress, evidence);
    }

    match lookup.lookup(ip).await {
        Ok(Some(country)) => {
            let locale = LocaleCode::from_country(&country);
            evidence.country = Some(country);
            Resolution::detected(locale, evidence)
        }
        Ok(None) => Resolution::fallback(settings.international_default, FallbackReason::CountryNotFound, evidence),
        Err(LookupError::Timeout) => {
            tracing::warn!(ip = %ip, lookup = lookup.name(), "Geo lookup timed out");
            Resolution::fallback(settings.international_default, FallbackReason::CountryNotFound, evidence)
        }
        Err(e) => {
            tracing::error!(ip = %ip, lookup = lookup.name(), error = %e, "Geo lookup failed");
            Resolution::fallback(
                settings.international_default,
                FallbackReason::Unavailable(e.to_string()),
                evidence,
            )
        }
    }
}
