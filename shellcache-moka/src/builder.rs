//! Builder for configuring [`MokaStore`].

use std::marker::PhantomData;

use moka::future::Cache;
use shellcache_core::CacheKey;
use smol_str::SmolStr;

use crate::store::MokaStore;

/// Builder for creating and configuring a [`MokaStore`].
///
/// The default store is unbounded, matching the observed lifecycle of the
/// offline layer: one generation that only grows or overwrites. An entry
/// bound is available for callers who want to cap storage growth.
///
/// # Examples
///
/// ```
/// use shellcache_moka::MokaStore;
///
/// let store: MokaStore<String> = MokaStore::builder("v1")
///     .max_entries(10_000)
///     .build();
/// ```
#[derive(Debug)]
pub struct MokaStoreBuilder<V> {
    name: SmolStr,
    max_entries: Option<u64>,
    _value: PhantomData<V>,
}

impl<V> MokaStoreBuilder<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a builder for a generation with the given name.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        MokaStoreBuilder {
            name: name.into(),
            max_entries: None,
            _value: PhantomData,
        }
    }

    /// Caps the store at `capacity` entries.
    ///
    /// When the cap is exceeded, Moka evicts least recently used entries.
    /// Leave unset for the default unbounded generation.
    pub fn max_entries(mut self, capacity: u64) -> Self {
        self.max_entries = Some(capacity);
        self
    }

    /// Builds the store.
    pub fn build(self) -> MokaStore<V> {
        let mut builder = Cache::<CacheKey, V>::builder();
        if let Some(capacity) = self.max_entries {
            builder = builder.max_capacity(capacity);
        }
        MokaStore {
            cache: builder.build(),
            name: self.name,
        }
    }
}
