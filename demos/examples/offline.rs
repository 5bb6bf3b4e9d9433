//! Example demonstrating the full offline-support stack:
//! - route normalization for virtual routes and deep links
//! - bypass of server-authoritative endpoints
//! - stale-while-revalidate serving against a flaky network
//!
//! Run:
//!   cargo run --example offline

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use http::Uri;
use shellcache::{FetchService, OffloadManager, Upstream};
use shellcache_http::{FetchRequest, FetchResponse, RouteTable};
use shellcache_moka::MokaStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
#[error("network unreachable")]
struct Unreachable;

/// A stand-in for the real network that can be switched off.
#[derive(Clone)]
struct SimulatedNetwork {
    offline: Arc<AtomicBool>,
}

#[async_trait]
impl Upstream<FetchRequest> for SimulatedNetwork {
    type Response = FetchResponse;
    type Error = Unreachable;

    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, Unreachable> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Unreachable);
        }
        Ok(FetchResponse::ok(format!(
            "<html>entry document for {}</html>",
            request.uri().path()
        )))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let routes = RouteTable::builder("/agenda")
        .route("/settings")
        .route("/agenda")
        .route("/mastodon")
        .route("/friends")
        .route("/stotra")
        .prefix("/survey/")
        .prefix("/friend-agenda/")
        .prefix("/event/")
        .build()?;

    let network = SimulatedNetwork {
        offline: Arc::new(AtomicBool::new(false)),
    };
    let store = Arc::new(MokaStore::<FetchResponse>::open("v1"));
    let offload = OffloadManager::new();
    let service = FetchService::builder(store, network.clone(), routes)
        .offload(offload.clone())
        .build();

    // A deep link is normalized to the canonical entry and cached.
    let response = service
        .handle(FetchRequest::document(Uri::from_static("/event/42")))
        .await?;
    info!(status = %response.status(), "deep link served from network");

    // An API call bypasses the cache entirely.
    let response = service
        .handle(FetchRequest::get(Uri::from_static("/api/agenda/42")))
        .await?;
    info!(status = %response.status(), "api call passed through");

    // Let the background refresh settle, then pull the plug.
    offload.wait_all().await;
    network.offline.store(true, Ordering::SeqCst);

    let response = service
        .handle(FetchRequest::document(Uri::from_static("/friend-agenda/alice")))
        .await?;
    info!(status = %response.status(), "served from cache while offline");

    offload.wait_all().await;
    Ok(())
}
