//! Metrics collection and exposition.
//!
//! # Metrics
//! - `locale_detections_total` (counter): detections by strategy, locale, detected
//! - `locale_detection_duration_seconds` (histogram): resolver latency by strategy
//! - `locale_geo_lookups_total` (counter): geo lookups by result
//! - `locale_config_reloads_total` (counter): hot reloads by result
//!
//! # Design Decisions
//! - The `metrics` facade is a no-op until an exporter is installed, so
//!   recording is always safe (tests, CLI)
//! - Prometheus exporter runs its own HTTP listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::config::Strategy;
use crate::locale::{FallbackReason, Resolution};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one detection and its latency.
pub fn record_detection(strategy: Strategy, resolution: &Resolution, started: Instant) {
    let detected = if resolution.is_detected() { "true" } else { "false" };
    counter!(
        "locale_detections_total",
        "strategy" => strategy.as_str(),
        "locale" => resolution.locale().as_str(),
        "detected" => detected
    )
    .increment(1);
    histogram!("locale_detection_duration_seconds", "strategy" => strategy.as_str())
        .record(started.elapsed().as_secs_f64());

    if strategy == Strategy::GeoIp {
        let result = match resolution.reason() {
            None => "hit",
            Some(FallbackReason::LocalAddress) => "local",
            Some(FallbackReason::CountryNotFound) => "miss",
            Some(FallbackReason::Malformed(_)) => "invalid",
            Some(_) => "error",
        };
        counter!("locale_geo_lookups_total", "result" => result).increment(1);
    }
}

pub fn record_config_reload(success: bool) {
    let result = if success { "ok" } else { "rejected" };
    counter!("locale_config_reloads_total", "result" => result).increment(1);
}
