//! Error types for the primary response path.
//!
//! The error taxonomy of the offline layer is deliberately narrow:
//!
//! - a cache miss is not an error, just the trigger for a network fetch;
//! - refresh failures are fully contained in the background task and
//!   recorded for diagnostics only — they never construct a [`FetchError`];
//! - the only failure that reaches the caller is a primary-path network
//!   fetch failing with no cached fallback.

use thiserror::Error;

/// Error returned by [`FetchService::handle`](crate::FetchService::handle).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The network fetch failed and no cached fallback existed.
    #[error("network unreachable and no cached fallback")]
    NetworkUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}
