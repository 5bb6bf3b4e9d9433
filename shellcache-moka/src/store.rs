//! Moka store implementation.

use async_trait::async_trait;
use moka::future::Cache;
use shellcache_core::{CacheKey, CacheStore, StoreResult};
use smol_str::SmolStr;

use crate::builder::MokaStoreBuilder;

/// In-memory cache store powered by Moka.
///
/// One `MokaStore` is the single named generation of the offline layer: it
/// lives for the process lifetime, is unbounded by default (entries persist
/// until overwritten by a later refresh of the same key), and tolerates
/// concurrent reads and writes with key-level last-write-wins semantics.
///
/// # Examples
///
/// ```
/// use shellcache_moka::MokaStore;
/// use shellcache_http::FetchResponse;
///
/// let store: MokaStore<FetchResponse> = MokaStore::open("v1");
/// ```
///
/// # Caveats
///
/// - Data is **not persisted** — the generation is lost on process restart.
/// - Unbounded by default — set a bound via
///   [`builder().max_entries(n)`](MokaStoreBuilder::max_entries) if
///   unchecked growth is a concern.
#[derive(Clone, Debug)]
pub struct MokaStore<V: Clone + Send + Sync + 'static> {
    pub(crate) cache: Cache<CacheKey, V>,
    pub(crate) name: SmolStr,
}

impl<V> MokaStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Opens an unbounded generation with the given name.
    pub fn open(name: impl Into<SmolStr>) -> Self {
        MokaStoreBuilder::new(name).build()
    }

    /// Returns a builder for a generation with the given name.
    pub fn builder(name: impl Into<SmolStr>) -> MokaStoreBuilder<V> {
        MokaStoreBuilder::new(name)
    }

    /// Approximate number of stored entries.
    ///
    /// Moka maintains this count lazily; call
    /// [`run_pending_tasks`](Self::run_pending_tasks) first when an exact
    /// count matters (tests).
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Returns whether an entry exists for `key` without touching recency.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.cache.contains_key(key)
    }

    /// Flushes Moka's internal maintenance queue.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

#[async_trait]
impl<V> CacheStore for MokaStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    type Value = V;

    async fn read(&self, key: &CacheKey) -> StoreResult<Option<V>> {
        Ok(self.cache.get(key).await)
    }

    async fn write(&self, key: &CacheKey, value: V) -> StoreResult<()> {
        self.cache.insert(key.clone(), value).await;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(url: &str) -> CacheKey {
        CacheKey::from_slice(&[("method", Some("GET")), ("url", Some(url))])
    }

    #[tokio::test]
    async fn read_returns_what_was_written() {
        let store: MokaStore<String> = MokaStore::open("v1");
        let key = key("/agenda");

        assert!(store.read(&key).await.unwrap().is_none());
        store.write(&key, "entry".into()).await.unwrap();
        assert_eq!(store.read(&key).await.unwrap().as_deref(), Some("entry"));
    }

    #[tokio::test]
    async fn later_write_overwrites_not_merges() {
        let store: MokaStore<String> = MokaStore::open("v1");
        let key = key("/agenda");

        store.write(&key, "old".into()).await.unwrap();
        store.write(&key, "new".into()).await.unwrap();
        assert_eq!(store.read(&key).await.unwrap().as_deref(), Some("new"));

        store.run_pending_tasks().await;
        assert_eq!(store.entry_count(), 1);
    }

    #[tokio::test]
    async fn generation_name_is_kept() {
        let store: MokaStore<String> = MokaStore::open("v1");
        assert_eq!(store.name(), "v1");
    }

    #[tokio::test]
    async fn bounded_store_still_reads_back() {
        let store: MokaStore<String> = MokaStore::builder("v1").max_entries(16).build();
        let key = key("/agenda");
        store.write(&key, "entry".into()).await.unwrap();
        assert_eq!(store.read(&key).await.unwrap().as_deref(), Some("entry"));
    }
}
