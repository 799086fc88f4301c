//! End-to-end tests for the geo-IP strategy against a mock geo service.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use locale_sdk::LocaleClient;
use locale_service::config::{validate_config, GeoProvider, ServiceConfig, Strategy};

mod common;

fn geo_config(geo_addr: std::net::SocketAddr, timeout_ms: u64) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.locale.strategy = Strategy::GeoIp;
    config.geo.provider = GeoProvider::Remote;
    config.geo.endpoint = Some(format!("http://{}/{{ip}}/json", geo_addr));
    config.geo.timeout_ms = timeout_ms;
    config
}

/// Mock geo service that answers with a fixed country code.
async fn country_service(country: &'static str) -> std::net::SocketAddr {
    common::start_programmable_backend(move |_path| async move {
        (200, format!(r#"{{"ip":"x","country_code":"{}"}}"#, country))
    })
    .await
}

#[tokio::test]
async fn mapped_country_is_detected() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_backend = seen.clone();
    let geo = common::start_programmable_backend(move |path| {
        seen_by_backend.lock().unwrap().push(path);
        async { (200, r#"{"country_code":"KR"}"#.to_string()) }
    })
    .await;

    let service = common::start_service(geo_config(geo, 1500)).await;
    let client = LocaleClient::new(&service.url());

    let detection = client.detect(Some("ja"), Some("203.0.113.7, 10.0.0.1")).await.unwrap();
    assert_eq!(detection.status, 200);
    assert_eq!(detection.body.locale, "ko");
    assert!(detection.body.detected);
    assert_eq!(detection.body.ip.as_deref(), Some("203.0.113.7"));
    assert_eq!(detection.body.country.as_deref(), Some("KR"));
    assert_eq!(seen.lock().unwrap().as_slice(), ["/203.0.113.7/json"]);

    service.shutdown.trigger();
}

#[tokio::test]
async fn unmapped_country_is_english_but_detected() {
    let geo = country_service("FR").await;
    let service = common::start_service(geo_config(geo, 1500)).await;
    let client = LocaleClient::new(&service.url());

    let detection = client.detect(None, Some("198.51.100.4")).await.unwrap();
    assert_eq!(detection.body.locale, "en");
    assert!(detection.body.detected);
    assert_eq!(detection.body.country.as_deref(), Some("FR"));

    service.shutdown.trigger();
}

#[tokio::test]
async fn loopback_never_queries_geo_service() {
    let calls = Arc::new(Mutex::new(0u32));
    let counter = calls.clone();
    let geo = common::start_programmable_backend(move |_path| {
        *counter.lock().unwrap() += 1;
        async { (200, r#"{"country_code":"KR"}"#.to_string()) }
    })
    .await;

    let service = common::start_service(geo_config(geo, 1500)).await;
    let client = LocaleClient::new(&service.url());

    // No forwarding headers: the TCP peer is 127.0.0.1.
    for forwarded in [None, Some("127.0.0.1"), Some("192.168.10.2"), Some("10.1.2.3")] {
        let detection = client.detect(None, forwarded).await.unwrap();
        assert_eq!(detection.body.locale, "ja", "{forwarded:?}");
        assert!(!detection.body.detected);
        assert_eq!(detection.body.country.as_deref(), Some("JP"));
    }
    assert_eq!(*calls.lock().unwrap(), 0);

    service.shutdown.trigger();
}

#[tokio::test]
async fn unknown_address_falls_back() {
    let geo = common::start_programmable_backend(|_path| async { (404, "{}".to_string()) }).await;
    let service = common::start_service(geo_config(geo, 1500)).await;
    let client = LocaleClient::new(&service.url());

    let detection = client.detect(None, Some("198.51.100.9")).await.unwrap();
    assert_eq!(detection.status, 200);
    assert_eq!(detection.body.locale, "en");
    assert!(!detection.body.detected);
    assert_eq!(detection.body.country, None);

    service.shutdown.trigger();
}

#[tokio::test]
async fn slow_geo_service_counts_as_no_country() {
    let geo = common::start_programmable_backend(|_path| async {
        tokio::time::sleep(Duration::from_secs(2)).await;
        (200, r#"{"country_code":"JP"}"#.to_string())
    })
    .await;
    let service = common::start_service(geo_config(geo, 200)).await;
    let client = LocaleClient::new(&service.url());

    let detection = client.detect(None, Some("198.51.100.10")).await.unwrap();
    assert_eq!(detection.status, 200);
    assert_eq!(detection.body.locale, "en");
    assert!(!detection.body.detected);
    assert_eq!(detection.body.error, None);

    service.shutdown.trigger();
}

#[tokio::test]
async fn request_deadline_still_answers_with_locale() {
    let geo = common::start_programmable_backend(|_path| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, r#"{"country_code":"KR"}"#.to_string())
    })
    .await;
    let mut config = geo_config(geo, 1500);
    config.timeouts.request_secs = 1;
    assert!(validate_config(&config).is_err());

    let service = common::start_service(config).await;
    let client = LocaleClient::new(&service.url());

    let detection = client.detect(None, Some("198.51.100.12")).await.unwrap();
    assert_eq!(detection.status, 200);
    assert_eq!(detection.body.locale, "en");
    assert!(!detection.body.detected);
    assert_eq!(detection.body.ip.as_deref(), Some("198.51.100.12"));
    assert_eq!(detection.body.error, None);

    service.shutdown.trigger();
}

#[tokio::test]
async fn undecodable_geo_response_returns_500_with_locale() {
    let geo = common::start_programmable_backend(|_path| async { (200, "<html>gateway</html>".to_string()) }).await;
    let service = common::start_service(geo_config(geo, 1500)).await;
    let client = LocaleClient::new(&service.url());

    let detection = client.detect(None, Some("198.51.100.13")).await.unwrap();
    assert_eq!(detection.status, 500);
    assert_eq!(detection.body.locale, "en");
    assert!(!detection.body.detected);
    let error = detection.body.error.unwrap_or_default();
    assert!(error.starts_with("geo service response could not be decoded"), "{error}");

    service.shutdown.trigger();
}

#[tokio::test]
async fn failing_geo_service_returns_500_with_locale() {
    let geo = common::start_programmable_backend(|_path| async { (503, "{}".to_string()) }).await;
    let service = common::start_service(geo_config(geo, 1500)).await;
    let client = LocaleClient::new(&service.url());

    let detection = client.detect(None, Some("198.51.100.11")).await.unwrap();
    assert_eq!(detection.status, 500);
    assert_eq!(detection.body.locale, "en");
    assert!(!detection.body.detected);
    assert_eq!(detection.body.error.as_deref(), Some("geo service returned status 503"));
    assert_eq!(detection.switch_to(), None);

    service.shutdown.trigger();
}

#[tokio::test]
async fn invalid_forwarded_address_is_not_a_failure() {
    let geo = country_service("JP").await;
    let service = common::start_service(geo_config(geo, 1500)).await;
    let client = LocaleClient::new(&service.url());

    let detection = client.detect(None, Some("unknown")).await.unwrap();
    assert_eq!(detection.status, 200);
    assert_eq!(detection.body.locale, "en");
    assert!(!detection.body.detected);
    assert!(detection.body.error.is_some());

    service.shutdown.trigger();
}
