// src/exec/mod.rs

//! Execution hand-off.
//!
//! - [`notifier`] defines the [`Notifier`] trait the external executor
//!   implements.
//! - [`dispatcher`] provides the [`Dispatcher`] that forwards run and status
//!   requests to it.

pub mod dispatcher;
pub mod notifier;

pub use dispatcher::Dispatcher;
pub use notifier::{Notifier, NotifierFuture, TaskId};
