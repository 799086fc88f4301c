//! Client address extraction from forwarding headers.
//!
//! Precedence: first `X-Forwarded-For` entry, then `X-Real-IP`, then the
//! TCP peer, then loopback. Headers are taken at face value; the service is
//! expected to sit behind a proxy that overwrites them.

use std::net::IpAddr;

use axum::http::HeaderMap;

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";
pub const LOOPBACK: &str = "127.0.0.1";

pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> String {
    forwarded_for(headers)
        .or_else(|| header_text(headers, X_REAL_IP))
        .or_else(|| peer.map(|ip| ip.to_string()))
        .unwrap_or_else(|| LOOPBACK.to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    let value = header_text(headers, X_FORWARDED_FOR)?;
    let first = value.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(name)?.to_str().ok()?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn forwarded_for_first_entry_wins() {
        let h = headers(&[(X_FORWARDED_FOR, "203.0.113.7, 10.0.0.1"), (X_REAL_IP, "198.51.100.1")]);
        assert_eq!(client_ip(&h, Some("192.0.2.5".parse().unwrap())), "203.0.113.7");
    }

    #[test]
    fn falls_back_to_real_ip_then_peer_then_loopback() {
        let h = headers(&[(X_REAL_IP, "198.51.100.1")]);
        assert_eq!(client_ip(&h, None), "198.51.100.1");

        let h = headers(&[(X_FORWARDED_FOR, " , 10.0.0.1")]);
        assert_eq!(client_ip(&h, Some("192.0.2.5".parse().unwrap())), "192.0.2.5");

        assert_eq!(client_ip(&HeaderMap::new(), None), LOOPBACK);
    }
}
