//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration, apply CLI overrides
//! - Initialize logging and metrics
//! - Start the config watcher when asked
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::{load_config, validate_config, ConfigError, ConfigWatcher, ServiceConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::{logging, metrics};

/// Options taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub config_path: Option<PathBuf>,
    pub bind_override: Option<String>,
    pub watch: bool,
}

/// Resolve the effective configuration.
pub fn resolve_config(options: &StartupOptions) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &options.config_path {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = &options.bind_override {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

/// Run the service to completion.
pub async fn run(options: StartupOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(&options)?;
    logging::init(&config.observability)?;

    tracing::info!("locale-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        strategy = config.locale.strategy.as_str(),
        geo_provider = ?config.geo.provider,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let (_watcher, config_updates) = match (&options.config_path, options.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let server = HttpServer::new(config.clone())?;
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = resolve_config(&StartupOptions::default()).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn bind_override_is_validated() {
        let options = StartupOptions {
            bind_override: Some("127.0.0.1:4000".into()),
            ..StartupOptions::default()
        };
        assert_eq!(resolve_config(&options).unwrap().listener.bind_address, "127.0.0.1:4000");

        let options = StartupOptions {
            bind_override: Some("localhost".into()),
            ..StartupOptions::default()
        };
        assert!(matches!(resolve_config(&options), Err(ConfigError::Validation(_))));
    }
}
