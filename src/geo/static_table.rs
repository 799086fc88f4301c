//! In-process country table loaded from `[geo.static_entries]`.

use std::collections::HashMap;
use std::net::IpAddr;

use async_trait::async_trait;

use super::{normalize_country, CountryLookup, LookupError};

/// Exact-address country table.
#[derive(Debug, Default, Clone)]
pub struct StaticLookup {
    entries: HashMap<IpAddr, String>,
}

impl StaticLookup {
    pub fn new(entries: HashMap<IpAddr, String>) -> Self {
        Self { entries }
    }

    /// Build from the raw config map. Entries that fail to parse are skipped;
    /// validation reports them before a config is accepted.
    pub fn from_config(raw: &HashMap<String, String>) -> Self {
        let mut entries = HashMap::with_capacity(raw.len());
        for (addr, country) in raw {
            match (addr.trim().parse::<IpAddr>(), normalize_country(country)) {
                (Ok(ip), Some(country)) => {
                    entries.insert(ip, country);
                }
                _ => {
                    tracing::warn!(address = %addr, country = %country, "Skipping invalid static geo entry");
                }
            }
        }
        tracing::debug!(entries = entries.len(), "Static geo table loaded");
        Self { entries }
    }
}

#[async_trait]
impl CountryLookup for StaticLookup {
    async fn lookup(&self, ip: IpAddr) -> Result<Option<String>, LookupError> {
        Ok(self.entries.get(&ip).cloned())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn looks_up_exact_addresses() {
        let mut raw = HashMap::new();
        raw.insert("203.0.113.7".to_string(), "kr".to_string());
        raw.insert("2001:db8::1".to_string(), "JP".to_string());
        let table = StaticLookup::from_config(&raw);

        assert_eq!(table.lookup("203.0.113.7".parse().unwrap()).await, Ok(Some("KR".into())));
        assert_eq!(table.lookup("2001:db8::1".parse().unwrap()).await, Ok(Some("JP".into())));
        assert_eq!(table.lookup("198.51.100.1".parse().unwrap()).await, Ok(None));
    }

    #[tokio::test]
    async fn skips_invalid_entries() {
        let mut raw = HashMap::new();
        raw.insert("not-an-ip".to_string(), "KR".to_string());
        raw.insert("198.51.100.2".to_string(), "Korea".to_string());
        raw.insert("198.51.100.3".to_string(), "cn".to_string());
        let table = StaticLookup::from_config(&raw);

        assert_eq!(table.lookup("198.51.100.2".parse().unwrap()).await, Ok(None));
        assert_eq!(table.lookup("198.51.100.3".parse().unwrap()).await, Ok(Some("CN".into())));
    }
}
