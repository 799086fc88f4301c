//! Response bodies.
//!
//! # Responsibilities
//! - Shape the detection JSON consumed by the front end
//! - Map recovered dependency failures to 500 while keeping `locale`
//! - Turn handler panics into the same JSON contract
//!
//! # Design Decisions
//! - `locale` and `detected` are always present; diagnostics are optional
//! - Field names are camelCase to match the front end

use std::any::Any;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::ResponseForPanic;

use crate::http::server::AppState;
use crate::locale::{LocaleCode, Resolution};

/// Body of `GET /api/detect-locale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectLocaleResponse {
    pub locale: LocaleCode,
    pub detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetectLocaleResponse {
    /// Body for failures that happened outside the resolver.
    pub fn failure(locale: LocaleCode, error: impl Into<String>) -> Self {
        Self {
            locale,
            detected: false,
            accept_language: None,
            languages: None,
            ip: None,
            country: None,
            error: Some(error.into()),
        }
    }
}

impl From<&Resolution> for DetectLocaleResponse {
    fn from(resolution: &Resolution) -> Self {
        let evidence = resolution.evidence();
        Self {
            locale: resolution.locale(),
            detected: resolution.is_detected(),
            accept_language: evidence.accept_language.clone(),
            languages: evidence.languages.clone(),
            ip: evidence.ip.clone(),
            country: evidence.country.clone(),
            error: resolution.error().map(str::to_string),
        }
    }
}

/// 200 for detections and ordinary fallbacks, 500 when a dependency failed.
pub fn detection_response(resolution: &Resolution) -> Response {
    let status = if resolution.is_failure() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    (status, Json(DetectLocaleResponse::from(resolution))).into_response()
}

/// Panic handler for `CatchPanicLayer`; answers with the active
/// strategy's safe default.
#[derive(Clone)]
pub struct PanicFallback {
    state: AppState,
}

impl PanicFallback {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl ResponseForPanic for PanicFallback {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        let locale = self.state.inner.load().resolver.safe_default();
        panic_response(locale, err)
    }
}

pub fn panic_response(locale: LocaleCode, err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(DetectLocaleResponse::failure(locale, "internal error")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ServiceConfig, Strategy};
    use crate::http::server::ServiceState;
    use crate::locale::{Evidence, FallbackReason};
    use serde_json::json;

    #[test]
    fn header_detection_shape() {
        let res = Resolution::detected(
            LocaleCode::Ja,
            Evidence {
                accept_language: Some("ja,en;q=0.8".into()),
                languages: Some(vec!["ja".into(), "en".into()]),
                ..Evidence::default()
            },
        );
        let body = serde_json::to_value(DetectLocaleResponse::from(&res)).unwrap();
        assert_eq!(
            body,
            json!({
                "locale": "ja",
                "detected": true,
                "acceptLanguage": "ja,en;q=0.8",
                "languages": ["ja", "en"],
            })
        );
    }

    #[test]
    fn geo_local_shape() {
        let res = Resolution::fallback(
            LocaleCode::Ja,
            FallbackReason::LocalAddress,
            Evidence {
                ip: Some("127.0.0.1".into()),
                country: Some("JP".into()),
                ..Evidence::default()
            },
        );
        let body = serde_json::to_value(DetectLocaleResponse::from(&res)).unwrap();
        assert_eq!(
            body,
            json!({ "locale": "ja", "detected": false, "ip": "127.0.0.1", "country": "JP" })
        );
    }

    #[test]
    fn failure_maps_to_500() {
        let res = Resolution::fallback(
            LocaleCode::En,
            FallbackReason::Unavailable("geo service returned status 502".into()),
            Evidence::default(),
        );
        assert_eq!(detection_response(&res).status(), StatusCode::INTERNAL_SERVER_ERROR);

        let miss = Resolution::fallback(LocaleCode::En, FallbackReason::CountryNotFound, Evidence::default());
        assert_eq!(detection_response(&miss).status(), StatusCode::OK);
    }

    async fn body_of(response: Response) -> DetectLocaleResponse {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn panic_uses_configured_default() {
        let mut config = ServiceConfig::default();
        config.locale.default_locale = LocaleCode::Ja;
        let state = AppState::new(ServiceState::from_config(config).unwrap());

        let response = PanicFallback::new(state).response_for_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body.locale, LocaleCode::Ja);
        assert!(!body.detected);
        assert_eq!(body.error.as_deref(), Some("internal error"));
    }

    #[tokio::test]
    async fn panic_under_geo_strategy_uses_international_default() {
        let mut config = ServiceConfig::default();
        config.locale.strategy = Strategy::GeoIp;
        config.locale.international_default = LocaleCode::Zh;
        let state = AppState::new(ServiceState::from_config(config).unwrap());

        let body = body_of(PanicFallback::new(state).response_for_panic(Box::new(String::from("boom")))).await;
        assert_eq!(body.locale, LocaleCode::Zh);
    }
}
