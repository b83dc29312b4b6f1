//! Gamma API access for Polymarket events.
//!
//! This module handles:
//! - Event, tag and market types mirroring the upstream schema
//! - The Gamma API client

pub mod client;
pub mod types;

pub use client::{build_http_client, GammaClient};
pub use types::{Event, FetchOptions, Market, Tag};
