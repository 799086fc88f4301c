//! Route handlers.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::Strategy;
use crate::http::client_ip::client_ip;
use crate::http::request::request_id;
use crate::http::response::detection_response;
use crate::http::server::AppState;
use crate::locale::RequestSignal;
use crate::observability::metrics;
use crate::seo::sitemap::render_sitemap;

/// `GET /api/detect-locale`
pub async fn detect_locale(State(state): State<AppState>, request: Request<Body>) -> Response {
    let started = Instant::now();
    let (parts, _) = request.into_parts();

    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let client_ip = client_ip(&parts.headers, peer);
    let signal = RequestSignal {
        accept_language: parts.headers.get(header::ACCEPT_LANGUAGE).map(|v| v.as_bytes()),
        client_ip: &client_ip,
    };

    let service = state.inner.load_full();
    let strategy = service.resolver.strategy();
    let resolution = service.resolver.resolve_within(&signal, state.request_timeout).await;

    metrics::record_detection(strategy, &resolution, started);
    tracing::info!(
        request_id = %request_id(&parts.headers),
        strategy = strategy.as_str(),
        locale = %resolution.locale(),
        detected = resolution.is_detected(),
        reason = ?resolution.reason(),
        "Locale resolved"
    );

    detection_response(&resolution)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub strategy: Strategy,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let service = state.inner.load();
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        strategy: service.resolver.strategy(),
    })
}

/// `GET /sitemap.xml`
pub async fn sitemap(State(state): State<AppState>) -> Response {
    let service = state.inner.load();
    match render_sitemap(&service.config.site, Utc::now().date_naive()) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render sitemap");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
