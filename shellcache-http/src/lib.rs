#![warn(missing_docs)]
//! # shellcache-http
//!
//! The protocol layer of shellcache: immutable request/response
//! descriptors, the bypass classifier, and the routing table that rewrites
//! virtual routes to the single canonical entry path.
//!
//! ## Request identity
//!
//! A [`FetchRequest`] carries everything the interception layer needs to
//! make its decisions: method, target URI, headers, body, the destination
//! kind (document vs subresource), and the cache/redirect/priority
//! directives. It is immutable once built — normalization produces a *new*
//! request with all other fields carried over explicitly, never a partial
//! copy.

pub mod classifier;
pub mod request;
pub mod response;
pub mod routes;

pub use classifier::RequestClassifier;
pub use request::{CacheMode, Destination, FetchRequest, FetchRequestBuilder, Priority, RedirectMode};
pub use response::FetchResponse;
pub use routes::{RouteError, RouteTable, RouteTableBuilder};
