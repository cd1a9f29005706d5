// src/exec/notifier.rs

//! Executor seam.
//!
//! The control plane never runs jobs itself. A [`Notifier`] is whatever
//! component actually starts a job and tracks it; the dispatcher forwards
//! run and status requests to it and relays the answers unchanged.

use std::future::Future;
use std::pin::Pin;

/// Identifier handed back by the executor for a started run.
pub type TaskId = String;

/// Boxed future returned by [`Notifier`] methods.
pub type NotifierFuture<'a, T> = Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send + 'a>>;

/// Trait implemented by the external executor.
///
/// Production code plugs in a real executor; tests provide a fake that
/// records calls.
pub trait Notifier: Send + Sync {
    /// Start the job called `name` and return the executor's task id.
    fn on_run_job<'a>(&'a self, name: &'a str) -> NotifierFuture<'a, TaskId>;

    /// Report the status of a previously started task.
    fn status_by_task_id<'a>(&'a self, task_id: &'a str) -> NotifierFuture<'a, String>;
}
