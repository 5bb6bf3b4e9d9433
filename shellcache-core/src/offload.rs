//! Offload trait for background task execution.
//!
//! The response path never awaits a refresh: it spawns the work through an
//! [`Offload`] implementation and moves on. The primary implementation is
//! `OffloadManager` in the `shellcache` crate; [`DisabledOffload`] is a
//! no-op implementation for tests that must assert no background work runs.

use std::future::Future;

use smol_str::SmolStr;

/// Trait for spawning fire-and-forget background tasks.
///
/// The spawned future is never awaited by the caller; its outcome must not
/// affect any already-resolved response. Implementors should use `Arc`
/// internally so that all cloned instances share the same state.
pub trait Offload: Send + Sync + Clone {
    /// Spawn a future to be executed in the background.
    ///
    /// `kind` labels the task type (e.g. `"refresh"`) for tracing and
    /// metrics. The future must be `Send + 'static` as it may run on a
    /// different thread.
    fn spawn<F>(&self, kind: impl Into<SmolStr>, future: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// An [`Offload`] implementation that drops background work on the floor.
///
/// Useful in tests that assert the response path is fully decoupled from
/// refresh outcomes: with this executor no refresh ever runs, and the
/// response path must behave identically.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledOffload;

impl Offload for DisabledOffload {
    fn spawn<F>(&self, _kind: impl Into<SmolStr>, _future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
    }
}
