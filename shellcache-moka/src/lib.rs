#![warn(missing_docs)]
//! # shellcache-moka
//!
//! In-memory [`CacheStore`](shellcache_core::CacheStore) implementation
//! backed by [Moka](https://docs.rs/moka), for single-process offline
//! caching.

mod builder;
mod store;

pub use builder::MokaStoreBuilder;
pub use store::MokaStore;
