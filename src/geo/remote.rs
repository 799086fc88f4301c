//! HTTP geo service client.
//!
//! The endpoint is a URL template with an `{ip}` placeholder, e.g.
//! `https://ipapi.co/{ip}/json/`. The response must be a JSON object; the
//! country code is read from `country_field`.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{normalize_country, CountryLookup, LookupError};
use crate::config::GeoConfig;

/// Placeholder substituted with the client address.
pub const IP_PLACEHOLDER: &str = "{ip}";

pub struct RemoteLookup {
    endpoint: String,
    country_field: String,
    http: reqwest::Client,
}

impl RemoteLookup {
    pub fn new(endpoint: String, country_field: String, timeout: Duration) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Config(e.to_string()))?;
        Ok(Self {
            endpoint,
            country_field,
            http,
        })
    }

    pub fn from_config(config: &GeoConfig) -> Result<Self, LookupError> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| LookupError::Config("remote provider requires geo.endpoint".into()))?;
        Self::new(
            endpoint,
            config.country_field.clone(),
            Duration::from_millis(config.timeout_ms),
        )
    }

    fn url_for(&self, ip: IpAddr) -> String {
        self.endpoint.replace(IP_PLACEHOLDER, &ip.to_string())
    }
}

fn request_error(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout
    } else if e.is_decode() {
        LookupError::Decode(e.to_string())
    } else {
        LookupError::Request(e.to_string())
    }
}

#[async_trait]
impl CountryLookup for RemoteLookup {
    async fn lookup(&self, ip: IpAddr) -> Result<Option<String>, LookupError> {
        let url = self.url_for(ip);
        tracing::debug!(url = %url, "Querying geo service");

        let resp = self.http.get(&url).send().await.map_err(request_error)?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body: serde_json::Value = resp.json().await.map_err(request_error)?;
        let country = body
            .get(&self.country_field)
            .and_then(|v| v.as_str())
            .and_then(normalize_country);
        Ok(country)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
