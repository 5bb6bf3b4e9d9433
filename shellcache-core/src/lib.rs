#![warn(missing_docs)]
//! # shellcache-core
//!
//! Core traits and types for the shellcache offline-support layer.
//!
//! This crate provides the foundational abstractions that keep shellcache
//! **protocol-agnostic** and **testable**. It defines the traits that
//! protocol implementations (like `shellcache-http`) and store
//! implementations (like `shellcache-moka`) plug into.
//!
//! ## Architecture
//!
//! The fetch-serve coordinator in the `shellcache` crate is wired together
//! from these seams:
//!
//! - **Decide** whether a request is intercepted at all ([`Classify`])
//! - **Identify** a request in the cache ([`CacheKey`])
//! - **Store** previously observed responses ([`CacheStore`])
//! - **Reach** the network ([`Upstream`])
//! - **Refresh** cache entries in the background ([`Offload`])

pub mod classify;
pub mod key;
pub mod offload;
pub mod store;
pub mod upstream;

pub use classify::{Classify, Flow};
pub use key::{CacheKey, KeyPart};
pub use offload::{DisabledOffload, Offload};
pub use store::{CacheStore, StoreError, StoreResult};
pub use upstream::Upstream;
