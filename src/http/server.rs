//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, panic recovery)
//! - Bind server to listener
//! - Swap in reloaded configuration without dropping connections

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer};

use crate::config::ServiceConfig;
use crate::geo::{build_lookup, LookupError};
use crate::http::{handlers, request, response};
use crate::locale::LocaleResolver;

/// Everything a request needs, rebuilt as a unit on reload.
pub struct ServiceState {
    pub config: ServiceConfig,
    pub resolver: LocaleResolver,
}

impl ServiceState {
    pub fn from_config(config: ServiceConfig) -> Result<Self, LookupError> {
        let lookup = build_lookup(&config.geo)?;
        let resolver = LocaleResolver::from_config(&config.locale, lookup);
        Ok(Self { config, resolver })
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<ServiceState>>,
    /// Deadline for one detection, fixed at startup.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(state: ServiceState) -> Self {
        let request_timeout = Duration::from_secs(state.config.timeouts.request_secs);
        Self {
            inner: Arc::new(ArcSwap::from_pointee(state)),
            request_timeout,
        }
    }

    /// Rebuild the service state from `config` and swap it in.
    ///
    /// Listener address and request timeout are fixed at startup.
    pub fn reload(&self, config: ServiceConfig) -> Result<(), LookupError> {
        let current = self.inner.load();
        if current.config.listener != config.listener || current.config.timeouts != config.timeouts {
            tracing::warn!("Listener and timeout changes take effect after restart");
        }
        let next = ServiceState::from_config(config)?;
        tracing::info!(strategy = next.resolver.strategy().as_str(), "Configuration reloaded");
        self.inner.store(Arc::new(next));
        Ok(())
    }
}

/// HTTP server for the locale service.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, LookupError> {
        let state = AppState::new(ServiceState::from_config(config)?);
        let router = Self::build_router(state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// `TimeoutLayer` wraps only the plain routes; detection applies the
    /// same deadline through the resolver.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let no_store = SetResponseHeaderLayer::overriding(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

        Router::new()
            .route("/sitemap.xml", get(handlers::sitemap))
            .route("/health", get(handlers::health))
            .route_layer(TimeoutLayer::new(state.request_timeout))
            .route("/api/detect-locale", get(handlers::detect_locale).layer(no_store))
            .with_state(state.clone())
            .layer(CatchPanicLayer::custom(response::PanicFallback::new(state)))
            .layer(request::propagate_request_id_layer())
            .layer(request::trace_layer())
            .layer(request::set_request_id_layer())
    }

    /// The router, for in-process use (tests, embedding).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Run the server until `shutdown` fires, applying config updates as
    /// they arrive.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServiceConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            strategy = self.state.inner.load().resolver.strategy().as_str(),
            "HTTP server starting"
        );

        let reload_state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                if let Err(e) = reload_state.reload(config) {
                    tracing::error!(error = %e, "Rejected reloaded configuration");
                }
            }
        });

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
