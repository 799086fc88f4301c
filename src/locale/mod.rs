//! Locale resolution subsystem.
//!
//! # Data Flow
//! ```text
//! request signal
//!     → resolver.rs (pick the configured strategy)
//!         → accept_language.rs (parse, sort by quality, first supported)
//!         → geo_ip.rs (local ranges short-circuit, else country lookup)
//!     → outcome.rs (Detected | Fallback with reason)
//!     → code.rs (closed set: ja, ko, zh, en)
//! ```
//!
//! # Design Decisions
//! - Strategy is explicit configuration; the two are never merged
//! - Lookup tables are exhaustive matches over a closed enum
//! - Failure is a fallback variant, never an `Err`

pub mod accept_language;
pub mod code;
pub mod geo_ip;
pub mod outcome;
pub mod resolver;

pub use code::{LocaleCode, UnknownLocale};
pub use outcome::{Evidence, FallbackReason, Resolution};
pub use resolver::{LocaleResolver, RequestSignal};
