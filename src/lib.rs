//! Locale detection service library.

pub mod config;
pub mod geo;
pub mod http;
pub mod lifecycle;
pub mod locale;
pub mod observability;
pub mod seo;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use locale::{LocaleCode, LocaleResolver, Resolution};
