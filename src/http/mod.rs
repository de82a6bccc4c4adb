//! HTTP transport module
//!
//! Provides a thin HTTP client and the [`PageExecutor`](crate::paginate::PageExecutor)
//! implementation that speaks the CRM wire protocol: module GETs carrying
//! `page`/`per_page` parameters, version-specific response envelopes, and
//! error-envelope classification through the taxonomy.
//!
//! Retry, backoff, and authentication are deliberately absent; they belong
//! to an outer layer, not to this client.

mod client;
mod executor;

pub use client::{HttpClientConfig, HttpClientConfigBuilder, JsonResponse, RestClient};
pub use executor::HttpPageExecutor;
