//! Polymarket events server.
//!
//! A small HTTP service that proxies the Polymarket Gamma API: each request to
//! `/api/events` performs exactly one upstream call for the active, non-closed
//! events and passes the result through as JSON.
//!
//! ```text
//! GET /api/events?limit=5
//!   -> GET https://gamma-api.polymarket.com/events?active=true&closed=false&limit=5
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`market`]: Gamma API client and event types
//! - [`api`]: HTTP handlers and routes
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod market;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, ClientError, Result, ServerError};
