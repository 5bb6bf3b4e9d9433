//! The fetch-serve coordinator.
//!
//! [`FetchService`] orchestrates one intercepted request event:
//! classification, route normalization, cache lookup, network fallback and
//! the decoupled background refresh. Per event:
//!
//! ```text
//! RECEIVED -> CLASSIFIED -> BYPASS -> NETWORK -> DONE
//!                        \> NORMALIZED -> LOOKUP -> HIT  -> RESPONDED
//!                                               \> MISS -> NETWORK -> RESPONDED
//!                           (REFRESH spawned in parallel, outcome ignored)
//! ```
//!
//! The refresh task re-fetches the normalized request and overwrites the
//! store entry on success; its outcome never reaches the caller and never
//! affects the already-resolved response.

use std::sync::Arc;

use shellcache_core::{CacheKey, CacheStore, Classify, Flow, Offload, Upstream};
use shellcache_http::{FetchRequest, FetchResponse, RequestClassifier, RouteTable};
use tracing::{debug, info, trace, warn};

use crate::error::FetchError;
use crate::offload::OffloadManager;

#[cfg(feature = "metrics")]
use crate::metrics::{
    BYPASS_COUNTER, CACHE_HIT_COUNTER, CACHE_MISS_COUNTER, REFRESH_COMPLETED_COUNTER,
    REFRESH_FAILED_COUNTER,
};

/// The interception layer's per-event handler.
///
/// One service instance processes every request event; many events may be
/// in flight concurrently as independent tasks. The injected store is the
/// only shared mutable resource — there is no other handler state.
///
/// Construction goes through [`FetchService::builder`]; building the
/// service is the install step, after which it takes control of all
/// matching traffic immediately.
pub struct FetchService<S, U, O = OffloadManager> {
    store: Arc<S>,
    upstream: U,
    classifier: RequestClassifier,
    routes: RouteTable,
    offload: O,
}

impl<S, U> FetchService<S, U, OffloadManager> {
    /// Returns a builder wiring the store, upstream and routing table.
    ///
    /// Defaults: [`RequestClassifier::default`] bypass markers and a fresh
    /// [`OffloadManager`] for the refresh tasks.
    pub fn builder(store: Arc<S>, upstream: U, routes: RouteTable) -> FetchServiceBuilder<S, U> {
        FetchServiceBuilder {
            store,
            upstream,
            routes,
            classifier: RequestClassifier::default(),
            offload: OffloadManager::new(),
        }
    }
}

impl<S, U, O> FetchService<S, U, O>
where
    S: CacheStore<Value = FetchResponse> + 'static,
    U: Upstream<FetchRequest, Response = FetchResponse> + Clone + 'static,
    O: Offload,
{
    /// Handles one intercepted request event.
    ///
    /// Bypass requests are delegated straight to the network with no cache
    /// interaction of any kind. Intercepted requests are normalized, looked
    /// up, and answered from cache when possible; a cache miss falls back
    /// to the network. Either way a refresh task is spawned for the
    /// normalized request and never awaited.
    ///
    /// # Errors
    ///
    /// [`FetchError::NetworkUnavailable`] when the primary-path network
    /// fetch fails with no cached fallback. Refresh failures never surface
    /// here.
    pub async fn handle(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        match self.classifier.classify(request) {
            Flow::Bypass(request) => {
                trace!(path = %request.uri().path(), "bypassing reserved route");
                #[cfg(feature = "metrics")]
                metrics::counter!(*BYPASS_COUNTER).increment(1);
                self.fetch_upstream(request).await
            }
            Flow::Intercept(request) => {
                let request = self.routes.normalize(request);
                let key = request.cache_key();

                let cached = match self.store.read(&key).await {
                    Ok(cached) => cached,
                    Err(error) => {
                        // The cache must degrade the response path, not
                        // break it: a failed lookup is handled as a miss.
                        warn!(%key, %error, "cache read failed, falling back to network");
                        None
                    }
                };

                // Spawned regardless of the lookup outcome, and never
                // awaited: the refresh must not delay the response.
                self.spawn_refresh(key.clone(), request.clone());

                match cached {
                    Some(response) => {
                        debug!(%key, "cache hit");
                        #[cfg(feature = "metrics")]
                        metrics::counter!(*CACHE_HIT_COUNTER).increment(1);
                        Ok(response)
                    }
                    None => {
                        debug!(%key, "cache miss");
                        #[cfg(feature = "metrics")]
                        metrics::counter!(*CACHE_MISS_COUNTER).increment(1);
                        self.fetch_upstream(request).await
                    }
                }
            }
        }
    }

    async fn fetch_upstream(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        self.upstream
            .fetch(request)
            .await
            .map_err(|error| FetchError::NetworkUnavailable(Box::new(error)))
    }

    /// Spawns the fire-and-forget refresh for a normalized request.
    ///
    /// On a successful fetch the store entry is overwritten (last write
    /// wins); failures are recorded for diagnostics and discarded.
    fn spawn_refresh(&self, key: CacheKey, request: FetchRequest) {
        let store = Arc::clone(&self.store);
        let upstream = self.upstream.clone();
        self.offload.spawn("refresh", async move {
            match upstream.fetch(request).await {
                Ok(response) => match store.write(&key, response).await {
                    Ok(()) => {
                        trace!(%key, "refresh stored fresh response");
                        #[cfg(feature = "metrics")]
                        metrics::counter!(*REFRESH_COMPLETED_COUNTER).increment(1);
                    }
                    Err(error) => {
                        warn!(%key, %error, "refresh failed to store response");
                        #[cfg(feature = "metrics")]
                        metrics::counter!(*REFRESH_FAILED_COUNTER).increment(1);
                    }
                },
                Err(error) => {
                    debug!(%key, %error, "refresh fetch failed");
                    #[cfg(feature = "metrics")]
                    metrics::counter!(*REFRESH_FAILED_COUNTER).increment(1);
                }
            }
        });
    }
}

/// Builder for [`FetchService`].
pub struct FetchServiceBuilder<S, U, O = OffloadManager> {
    store: Arc<S>,
    upstream: U,
    classifier: RequestClassifier,
    routes: RouteTable,
    offload: O,
}

impl<S, U, O> FetchServiceBuilder<S, U, O> {
    /// Replaces the default bypass classifier.
    pub fn classifier(mut self, classifier: RequestClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replaces the background task executor.
    pub fn offload<NewO>(self, offload: NewO) -> FetchServiceBuilder<S, U, NewO>
    where
        NewO: Offload,
    {
        FetchServiceBuilder {
            store: self.store,
            upstream: self.upstream,
            classifier: self.classifier,
            routes: self.routes,
            offload,
        }
    }

    /// Builds the service and takes control of matching traffic.
    pub fn build(self) -> FetchService<S, U, O>
    where
        S: CacheStore,
    {
        info!(
            store = self.store.name(),
            canonical = self.routes.canonical_path(),
            "interception layer installed"
        );
        FetchService {
            store: self.store,
            upstream: self.upstream,
            classifier: self.classifier,
            routes: self.routes,
            offload: self.offload,
        }
    }
}
