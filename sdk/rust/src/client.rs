use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Body of `GET /api/detect-locale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResponse {
    pub locale: String,
    pub detected: bool,
    #[serde(default)]
    pub accept_language: Option<String>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A detection response together with its HTTP status. Failures (500)
/// still carry a usable `locale`.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub status: u16,
    pub body: DetectResponse,
}

impl Detection {
    /// Locale the front end should switch to, if any.
    pub fn switch_to(&self) -> Option<&str> {
        (self.status == 200 && self.body.detected).then_some(self.body.locale.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
    pub strategy: String,
}

pub struct LocaleClient {
    client: Client,
    base_url: String,
}

impl LocaleClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .pool_max_idle_per_host(0)
                .no_proxy()
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Ask the service for a locale, optionally sending the headers a
    /// browser or proxy would.
    pub async fn detect(
        &self,
        accept_language: Option<&str>,
        forwarded_for: Option<&str>,
    ) -> Result<Detection, Box<dyn std::error::Error>> {
        let mut req = self.client.get(format!("{}/api/detect-locale", self.base_url));
        if let Some(value) = accept_language {
            req = req.header("Accept-Language", value);
        }
        if let Some(value) = forwarded_for {
            req = req.header("X-Forwarded-For", value);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;

        match serde_json::from_str::<DetectResponse>(&text) {
            Ok(body) => Ok(Detection { status, body }),
            Err(e) => Err(format!("Service returned status {} with unexpected body: {} ({})", status, text, e).into()),
        }
    }

    pub async fn health(&self) -> Result<Health, Box<dyn std::error::Error>> {
        let resp = self.client.get(format!("{}/health", self.base_url)).send().await?;
        if !resp.status().is_success() {
            return Err(format!("Service returned error status {}", resp.status()).into());
        }
        Ok(resp.json().await?)
    }

    pub async fn sitemap(&self) -> Result<String, Box<dyn std::error::Error>> {
        let resp = self.client.get(format!("{}/sitemap.xml", self.base_url)).send().await?;
        if !resp.status().is_success() {
            return Err(format!("Service returned error status {}", resp.status()).into());
        }
        Ok(resp.text().await?)
    }
}
