//! The network seam.
//!
//! [`Upstream`] abstracts "fetch this request from the network" so the
//! coordinator can be driven by a real client in production and a
//! programmable mock in tests.

use std::sync::Arc;

use async_trait::async_trait;

/// Fetches requests from the network.
///
/// The coordinator clones its upstream into every refresh task, so
/// implementations should be cheap to clone (hold shared state in `Arc`).
#[async_trait]
pub trait Upstream<Req>: Send + Sync {
    /// The response type produced by a successful fetch.
    type Response: Send;

    /// The error produced when the network is unreachable or the fetch
    /// otherwise fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches the request from the network.
    async fn fetch(&self, request: Req) -> Result<Self::Response, Self::Error>;
}

#[async_trait]
impl<T, Req> Upstream<Req> for Arc<T>
where
    T: Upstream<Req> + ?Sized,
    Req: Send + 'static,
{
    type Response = T::Response;
    type Error = T::Error;

    async fn fetch(&self, request: Req) -> Result<Self::Response, Self::Error> {
        (**self).fetch(request).await
    }
}
