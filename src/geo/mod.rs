//! Country lookup for client addresses.
//!
//! # Data Flow
//! ```text
//! client IP (already classified as public)
//!     → CountryLookup::lookup
//!         → static_table.rs (in-process table from config)
//!         → remote.rs (HTTP geo service, short timeout)
//!     → Some("KR") | None | LookupError
//! ```
//!
//! # Design Decisions
//! - One trait at the seam so the resolver does not care where data lives
//! - A timeout is its own error variant; the resolver treats it as a miss
//! - No retries: a failed lookup falls back immediately

pub mod remote;
pub mod static_table;

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{GeoConfig, GeoProvider};

pub use remote::RemoteLookup;
pub use static_table::StaticLookup;

/// Errors raised by a country lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("geo lookup timed out")]
    Timeout,

    #[error("geo service request failed: {0}")]
    Request(String),

    #[error("geo service returned status {0}")]
    Status(u16),

    #[error("geo service response could not be decoded: {0}")]
    Decode(String),

    #[error("geo lookup is misconfigured: {0}")]
    Config(String),
}

/// Resolves an address to an ISO 3166 alpha-2 country code.
#[async_trait]
pub trait CountryLookup: Send + Sync {
    /// `Ok(None)` means the source has no answer for this address.
    async fn lookup(&self, ip: IpAddr) -> Result<Option<String>, LookupError>;

    /// Short name for logs and metrics.
    fn name(&self) -> &'static str;
}

/// Build the lookup selected by `[geo].provider`.
pub fn build_lookup(config: &GeoConfig) -> Result<Arc<dyn CountryLookup>, LookupError> {
    match config.provider {
        GeoProvider::Static => Ok(Arc::new(StaticLookup::from_config(&config.static_entries))),
        GeoProvider::Remote => Ok(Arc::new(RemoteLookup::from_config(config)?)),
    }
}

/// Uppercase a country code, rejecting anything that is not two letters.
pub(crate) fn normalize_country(raw: &str) -> Option<String> {
    let code = raw.trim();
    if code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}
