//! Search-engine metadata served alongside the detection endpoint.

pub mod sitemap;
