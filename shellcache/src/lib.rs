#![warn(missing_docs)]
//! # shellcache
//!
//! An offline-support layer for single-page applications: it intercepts
//! outgoing requests, decides whether to bypass, rewrite, or serve them
//! from a local cache, and keeps that cache fresh via background refresh.
//!
//! The policy is **stale-while-revalidate**: intercepted requests are
//! answered from the cache the moment an entry exists, while every request
//! also spawns a fire-and-forget refresh that overwrites the entry with a
//! fresh network response. Users get instant responses under flaky or
//! absent connectivity, at the price of a bounded period of staleness.
//!
//! ## Wiring
//!
//! ```no_run
//! use std::sync::Arc;
//! # use async_trait::async_trait;
//! use shellcache::FetchService;
//! use shellcache_http::{FetchRequest, FetchResponse, RouteTable};
//! use shellcache_moka::MokaStore;
//! # #[derive(Clone)]
//! # struct HttpClient;
//! # #[derive(Debug, thiserror::Error)]
//! # #[error("unreachable")]
//! # struct Unreachable;
//! # #[async_trait]
//! # impl shellcache::Upstream<FetchRequest> for HttpClient {
//! #     type Response = FetchResponse;
//! #     type Error = Unreachable;
//! #     async fn fetch(&self, _r: FetchRequest) -> Result<FetchResponse, Unreachable> {
//! #         Ok(FetchResponse::ok(""))
//! #     }
//! # }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let routes = RouteTable::builder("/agenda")
//!     .route("/agenda")
//!     .route("/settings")
//!     .prefix("/event/")
//!     .build()?;
//! let store = Arc::new(MokaStore::<FetchResponse>::open("v1"));
//! let service = FetchService::builder(store, HttpClient, routes).build();
//! # let _ = service;
//! # Ok(())
//! # }
//! ```

/// Error types for the primary response path.
pub mod error;

/// Metrics collection for cache observability.
///
/// When the `metrics` feature is enabled, this module provides counters
/// for cache hits, misses, bypasses and refresh outcomes.
pub mod metrics;

/// Background task execution for the decoupled refresh path.
///
/// The response path never awaits a refresh; it hands the work to an
/// [`OffloadManager`](offload::OffloadManager) and resolves independently.
pub mod offload;

/// The fetch-serve coordinator.
pub mod service;

pub use error::FetchError;
pub use offload::OffloadManager;
pub use service::{FetchService, FetchServiceBuilder};

pub use shellcache_core::{
    CacheKey, CacheStore, Classify, DisabledOffload, Flow, KeyPart, Offload, StoreError,
    StoreResult, Upstream,
};
