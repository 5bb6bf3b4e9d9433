//! OffloadManager implementation for background task execution.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use shellcache_core::Offload;
use smol_str::SmolStr;
use tokio::task::JoinHandle;
use tracing::{Instrument, info_span};

#[cfg(feature = "metrics")]
use crate::metrics::OFFLOAD_TASKS_SPAWNED;

/// Key identifying a spawned background task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OffloadKey {
    /// Kind of the task (e.g. "refresh").
    kind: SmolStr,
    /// Unique identifier within the kind.
    id: u64,
}

impl OffloadKey {
    /// The task kind, used for tracing and metrics labels.
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// Handle to a spawned background task.
#[derive(Debug)]
pub struct OffloadHandle {
    handle: JoinHandle<()>,
}

impl OffloadHandle {
    /// Check if the task is finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Internal state shared across clones.
#[derive(Debug)]
struct OffloadManagerInner {
    tasks: DashMap<OffloadKey, OffloadHandle>,
    key_counter: AtomicU64,
}

/// Executor for fire-and-forget background tasks on the Tokio runtime.
///
/// Spawned tasks are tracked until completion so that tests (and shutdown
/// paths) can [`wait_all`](Self::wait_all); the response path itself never
/// awaits them. There is no timeout, no cancellation and no ordering
/// guarantee between tasks — by contract the outcome of a background
/// refresh must never affect an already-resolved response.
#[derive(Clone, Debug)]
pub struct OffloadManager {
    inner: Arc<OffloadManagerInner>,
}

impl OffloadManager {
    /// Create a new OffloadManager.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(OffloadManagerInner {
                tasks: DashMap::new(),
                key_counter: AtomicU64::new(0),
            }),
        }
    }

    /// Generate the next auto-incrementing key with the given kind.
    fn next_key(&self, kind: impl Into<SmolStr>) -> OffloadKey {
        let id = self.inner.key_counter.fetch_add(1, Ordering::Relaxed);
        OffloadKey {
            kind: kind.into(),
            id,
        }
    }

    /// Spawn a task, returning its tracking key.
    pub fn spawn<F>(&self, kind: impl Into<SmolStr>, task: F) -> OffloadKey
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let key = self.next_key(kind);

        #[cfg(feature = "metrics")]
        metrics::counter!(*OFFLOAD_TASKS_SPAWNED, "kind" => key.kind.to_string()).increment(1);

        let span = info_span!("offload_task", kind = %key.kind, id = key.id);
        let inner = self.inner.clone();
        let task_key = key.clone();
        let handle = tokio::spawn(
            async move {
                task.await;
                inner.tasks.remove(&task_key);
            }
            .instrument(span),
        );
        self.inner.tasks.insert(key.clone(), OffloadHandle { handle });
        key
    }

    /// Get the number of currently active tasks.
    pub fn active_task_count(&self) -> usize {
        self.inner.tasks.iter().filter(|e| !e.is_finished()).count()
    }

    /// Check if the task with the given key is still in flight.
    pub fn is_in_flight(&self, key: &OffloadKey) -> bool {
        self.inner.tasks.get(key).is_some_and(|h| !h.is_finished())
    }

    /// Clean up finished task handles.
    pub fn cleanup_finished(&self) {
        self.inner.tasks.retain(|_, handle| !handle.is_finished());
    }

    /// Wait for all currently tracked tasks to complete.
    ///
    /// Polls active tasks until all are finished, yielding between checks
    /// to let them make progress. Intended for tests and shutdown.
    pub async fn wait_all(&self) {
        loop {
            self.cleanup_finished();
            if self.inner.tasks.is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
    }
}

impl Default for OffloadManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Offload for OffloadManager {
    fn spawn<F>(&self, kind: impl Into<SmolStr>, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        OffloadManager::spawn(self, kind, future);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn spawned_task_runs_to_completion() {
        let manager = OffloadManager::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let task_counter = counter.clone();
        manager.spawn("test", async move {
            task_counter.fetch_add(1, Ordering::SeqCst);
        });

        manager.wait_all().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(manager.active_task_count(), 0);
    }

    #[tokio::test]
    async fn wait_all_covers_many_tasks() {
        let manager = OffloadManager::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..16 {
            let task_counter = counter.clone();
            manager.spawn("test", async move {
                tokio::task::yield_now().await;
                task_counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        manager.wait_all().await;
        assert_eq!(counter.load(Ordering::SeqCst), 16);
    }

    #[tokio::test]
    async fn keys_are_unique_per_spawn() {
        let manager = OffloadManager::new();
        let a = manager.spawn("refresh", async {});
        let b = manager.spawn("refresh", async {});
        assert_ne!(a, b);
        manager.wait_all().await;
    }
}
