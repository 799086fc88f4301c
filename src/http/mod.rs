//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span)
//!     → handlers.rs (detect-locale, sitemap, health)
//!         → client_ip.rs (forwarding headers → client address)
//!         → locale resolver
//!     → response.rs (JSON contract, status mapping)
//!     → Send to client
//! ```

pub mod client_ip;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::DetectLocaleResponse;
pub use server::{AppState, HttpServer, ServiceState};
