//! The cache store seam.
//!
//! A [`CacheStore`] is a single named key-value store of previously observed
//! responses, injected into the coordinator at construction rather than
//! reached through an ambient global. This keeps the lookup/write path
//! mockable for tests.
//!
//! The store models the lifetime semantics of the offline layer: it only
//! grows or overwrites, never shrinks. There is deliberately no remove
//! operation — entries persist until overwritten by a later refresh of the
//! same key, and concurrent writes to the same key resolve last-write-wins.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::CacheKey;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Internal store error, state or computation error.
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A named key-value store of cached responses.
///
/// Implementations must tolerate overlapping reads and writes from
/// concurrent in-flight requests; a lookup racing a write may observe either
/// the old or the new value.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// The stored value type.
    type Value: Clone + Send + Sync + 'static;

    /// Looks up the entry for `key`, if any.
    async fn read(&self, key: &CacheKey) -> StoreResult<Option<Self::Value>>;

    /// Writes `value` under `key`, overwriting any previous entry.
    async fn write(&self, key: &CacheKey, value: Self::Value) -> StoreResult<()>;

    /// Returns the store (generation) name, for diagnostics.
    fn name(&self) -> &str {
        "store"
    }
}

#[async_trait]
impl<T> CacheStore for Arc<T>
where
    T: CacheStore + ?Sized,
{
    type Value = T::Value;

    async fn read(&self, key: &CacheKey) -> StoreResult<Option<Self::Value>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: Self::Value) -> StoreResult<()> {
        (**self).write(key, value).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T> CacheStore for Box<T>
where
    T: CacheStore + ?Sized,
{
    type Value = T::Value;

    async fn read(&self, key: &CacheKey) -> StoreResult<Option<Self::Value>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: Self::Value) -> StoreResult<()> {
        (**self).write(key, value).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
