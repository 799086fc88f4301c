//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that the geo provider has what it needs
//! - Validate value ranges (timeouts > 0, geo lookup inside the request
//!   deadline, priorities in [0, 1])
//! - Validate addresses and URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::{IpAddr, SocketAddr};

use url::Url;

use crate::config::schema::{GeoProvider, ServiceConfig};
use crate::geo::remote::IP_PLACEHOLDER;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("geo.endpoint is required when geo.provider = \"remote\"")]
    MissingEndpoint,

    #[error("geo.endpoint {0:?} is not a valid http(s) URL")]
    InvalidEndpoint(String),

    #[error("geo.endpoint must contain the {{ip}} placeholder")]
    MissingPlaceholder,

    #[error("geo.timeout_ms ({geo_ms}) must be shorter than timeouts.request_secs ({request_secs}s)")]
    GeoTimeoutExceedsRequest { geo_ms: u64, request_secs: u64 },

    #[error("geo.country_field must not be empty")]
    EmptyCountryField,

    #[error("geo.static_entries: {address:?} → {country:?} is not an IP address and two-letter country code")]
    InvalidStaticEntry { address: String, country: String },

    #[error("locale.local_country {0:?} is not a two-letter country code")]
    InvalidLocalCountry(String),

    #[error("site.base_url {0:?} is not an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("site.pages[{index}].priority {priority} is outside [0, 1]")]
    InvalidPriority { index: usize, priority: f32 },
}

/// Check a deserialized configuration for semantic problems.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled && config.observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.request_secs",
        });
    }

    if !is_country_code(&config.locale.local_country) {
        errors.push(ValidationError::InvalidLocalCountry(config.locale.local_country.clone()));
    }

    validate_geo(config, &mut errors);
    validate_site(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_geo(config: &ServiceConfig, errors: &mut Vec<ValidationError>) {
    let geo = &config.geo;

    if geo.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "geo.timeout_ms" });
    }

    if geo.provider == GeoProvider::Remote {
        match &geo.endpoint {
            None => errors.push(ValidationError::MissingEndpoint),
            Some(endpoint) => {
                if !endpoint.contains(IP_PLACEHOLDER) {
                    errors.push(ValidationError::MissingPlaceholder);
                }
                // Substitute a sample address so the template parses as a URL.
                let sample = endpoint.replace(IP_PLACEHOLDER, "192.0.2.1");
                if !is_http_url(&sample) {
                    errors.push(ValidationError::InvalidEndpoint(endpoint.clone()));
                }
            }
        }
        if geo.country_field.trim().is_empty() {
            errors.push(ValidationError::EmptyCountryField);
        }
        let request_secs = config.timeouts.request_secs;
        if request_secs > 0 && geo.timeout_ms >= request_secs.saturating_mul(1000) {
            errors.push(ValidationError::GeoTimeoutExceedsRequest {
                geo_ms: geo.timeout_ms,
                request_secs,
            });
        }
    }

    let mut entries: Vec<_> = geo.static_entries.iter().collect();
    entries.sort();
    for (address, country) in entries {
        if address.trim().parse::<IpAddr>().is_err() || !is_country_code(country) {
            errors.push(ValidationError::InvalidStaticEntry {
                address: address.clone(),
                country: country.clone(),
            });
        }
    }
}

fn validate_site(config: &ServiceConfig, errors: &mut Vec<ValidationError>) {
    if !is_http_url(&config.site.base_url) {
        errors.push(ValidationError::InvalidBaseUrl(config.site.base_url.clone()));
    }

    for (index, page) in config.site.pages.iter().enumerate() {
        if !(0.0..=1.0).contains(&page.priority) {
            errors.push(ValidationError::InvalidPriority {
                index,
                priority: page.priority,
            });
        }
    }
}

fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

fn is_country_code(raw: &str) -> bool {
    raw.len() == 2 && raw.bytes().all(|b| b.is_ascii_alphabetic())
}
