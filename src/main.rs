//! Locale detection service.
//!
//! Serves `GET /api/detect-locale` for the site's front end, plus
//! `/sitemap.xml` and `/health`.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request          ┌──────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ request id ─▶ trace ─▶ timeout ─▶ handler  │
//!                             │                                     │        │
//!                             │                       ┌─────────────┴─────┐  │
//!                             │                       │  LocaleResolver   │  │
//!                             │                       │ header │ geo-ip   │──┼──▶ geo service
//!                             │                       └─────────┬─────────┘  │    (optional)
//!     Client Response         │                                 ▼            │
//!     ◀───────────────────────┼──────────────── JSON {locale, detected} ◀──  │
//!                             │                                              │
//!                             │  config (toml, hot reload) · logging ·       │
//!                             │  metrics · graceful shutdown                 │
//!                             └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use locale_service::lifecycle::{startup, StartupOptions};

#[derive(Parser)]
#[command(name = "locale-service")]
#[command(about = "Locale detection endpoint for the company site", long_about = None)]
struct Args {
    /// Path to a TOML config file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Reload the config file when it changes.
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    startup::run(StartupOptions {
        config_path: args.config,
        bind_override: args.bind,
        watch: args.watch,
    })
    .await
}
