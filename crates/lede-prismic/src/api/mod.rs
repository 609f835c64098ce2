//! Prismic REST API v2 client.

mod client;
mod endpoints;

pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use endpoints::{ApiErrorResponse, ApiResponse, RefEntry, SearchQuery, SearchResponse};
