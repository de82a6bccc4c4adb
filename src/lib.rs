// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]

//! # crmkit
//!
//! A minimal, Rust-native client toolkit for versioned CRM web APIs.
//!
//! ## Features
//!
//! - **Module Resolution**: Entity types map to remote modules by
//!   convention (pluralized type name, uppercased identifier field), with
//!   exact overrides for irregular names
//! - **Query Building**: Fluent parameter accumulation with pagination
//!   values validated at the call site
//! - **Auto-Pagination**: Sequential multi-page fetching with pluggable
//!   merge strategies and dual-signal stopping
//! - **Error Taxonomy**: Opaque API error codes classified into typed
//!   conditions carrying raw and generic descriptions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crmkit::entity::{EntityDescriptor, ModuleResolver};
//! use crmkit::http::{HttpClientConfig, HttpPageExecutor, RestClient};
//! use crmkit::paginate::Paginator;
//! use crmkit::query::QueryBuilder;
//! use crmkit::version::ApiVersion;
//!
//! #[tokio::main]
//! async fn main() -> crmkit::Result<()> {
//!     static LEAD: EntityDescriptor = EntityDescriptor::new("Lead");
//!
//!     let client = RestClient::new(
//!         HttpClientConfig::builder()
//!             .base_url("https://crm.example.com/api")
//!             .build(),
//!     )?;
//!     let executor = HttpPageExecutor::new(client, ApiVersion::V2);
//!
//!     let builder = QueryBuilder::for_entity(&LEAD, ApiVersion::V2)
//!         .parameter("sort_order", "asc")
//!         .per_page(200)?;
//!
//!     let merged = Paginator::new().fetch_all(&builder, &executor).await?;
//!     println!("{} records", merged.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Caller                              │
//! │  resolve(entity) → module    build query    fetch_all(...)  │
//! └─────────────────────────────────────────────────────────────┘
//!                │
//! ┌──────────┬───┴───────┬──────────────┬──────────────────────┐
//! │  Entity  │   Query   │   Paginate   │        HTTP          │
//! ├──────────┼───────────┼──────────────┼──────────────────────┤
//! │ Resolve  │ Builder   │ Paginator    │ RestClient           │
//! │ Pluralize│ QuerySpec │ PageMerger   │ HttpPageExecutor     │
//! │          │ Validate  │ CancelToken  │ Taxonomy classify    │
//! └──────────┴───────────┴──────────────┴──────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: per-variant docs on Error and ParamValue before 1.0

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// API protocol generations and response layouts
pub mod version;

/// Classification of remote API error codes
pub mod taxonomy;

/// Entity metadata and module resolution
pub mod entity;

/// Query construction and validation
pub mod query;

/// Auto-pagination over a page executor
pub mod paginate;

/// HTTP transport
pub mod http;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use version::ApiVersion;

// Re-export the core surface
pub use entity::{EntityDescriptor, ModuleBinding, ModuleResolver};
pub use paginate::{MergedResult, PageExecutor, PageResult, Paginator};
pub use query::{QueryBuilder, QuerySpec};
pub use taxonomy::{ApiErrorCondition, ApiErrorKind, ErrorTaxonomy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
