//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::locale::LocaleCode;

/// Root configuration for the locale service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Locale detection strategy and defaults.
    pub locale: LocaleConfig,

    /// Country lookup used by the geo strategy.
    pub geo: GeoConfig,

    /// Public site description used for the sitemap.
    pub site: SiteConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Which request signal drives detection.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Parse the `Accept-Language` header.
    #[default]
    AcceptLanguage,
    /// Look up the client address's country.
    GeoIp,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::AcceptLanguage => "accept_language",
            Strategy::GeoIp => "geo_ip",
        }
    }
}

/// Locale detection configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LocaleConfig {
    pub strategy: Strategy,

    /// Fallback for the header strategy.
    pub default_locale: LocaleCode,

    /// Locale for loopback and private-range clients (geo strategy).
    pub local_locale: LocaleCode,

    /// Country reported for loopback and private-range clients.
    pub local_country: String,

    /// Fallback when no country is found (geo strategy).
    pub international_default: LocaleCode,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::AcceptLanguage,
            default_locale: LocaleCode::En,
            local_locale: LocaleCode::Ja,
            local_country: "JP".to_string(),
            international_default: LocaleCode::En,
        }
    }
}

/// Where country data comes from.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GeoProvider {
    /// In-process table from `static_entries`.
    #[default]
    Static,
    /// HTTP geo service at `endpoint`.
    Remote,
}

/// Country lookup configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GeoConfig {
    pub provider: GeoProvider,

    /// URL template with an `{ip}` placeholder (remote provider).
    pub endpoint: Option<String>,

    /// JSON field holding the country code in the service response.
    pub country_field: String,

    /// Lookup timeout in milliseconds; a timeout counts as "no country".
    pub timeout_ms: u64,

    /// Address → country table (static provider).
    pub static_entries: HashMap<String, String>,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            provider: GeoProvider::Static,
            endpoint: None,
            country_field: "country_code".to_string(),
            timeout_ms: 1500,
            static_entries: HashMap::new(),
        }
    }
}

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

/// One sitemap entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SitemapPage {
    /// Path appended to the base URL ("" for the root).
    #[serde(default)]
    pub path: String,

    pub change_frequency: ChangeFrequency,

    /// Relative priority in [0, 1].
    pub priority: f32,
}

impl SitemapPage {
    fn new(path: &str, change_frequency: ChangeFrequency, priority: f32) -> Self {
        Self {
            path: path.to_string(),
            change_frequency,
            priority,
        }
    }
}

/// Public site description.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute site URL without trailing slash.
    pub base_url: String,

    pub pages: Vec<SitemapPage>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wapeta.com".to_string(),
            pages: vec![
                SitemapPage::new("", ChangeFrequency::Weekly, 1.0),
                SitemapPage::new("/#home", ChangeFrequency::Weekly, 1.0),
                SitemapPage::new("/#services", ChangeFrequency::Monthly, 0.9),
                SitemapPage::new("/#about", ChangeFrequency::Monthly, 0.8),
                SitemapPage::new("/#contact", ChangeFrequency::Monthly, 0.7),
            ],
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
