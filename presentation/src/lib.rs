//! Presentation layer for vantage
//!
//! JSON HTTP API over the application layer: public reads, admin-gated
//! writes, and the batch perspective generation endpoint.

pub mod http;

pub use http::{build_router, AppState};
