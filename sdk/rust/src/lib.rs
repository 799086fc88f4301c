//! Client for the locale service.

pub mod client;

pub use client::{DetectResponse, Detection, Health, LocaleClient};
