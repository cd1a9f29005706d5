// src/exec/dispatcher.rs

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::{JobdagError, Result};
use crate::exec::notifier::{Notifier, TaskId};

/// Stateless façade over an optional [`Notifier`].
///
/// Holds no lock and keeps no record of dispatched runs. Retries and
/// timeouts belong to the executor and the caller respectively.
#[derive(Clone, Default)]
pub struct Dispatcher {
    notifier: Option<Arc<dyn Notifier>>,
}

impl Dispatcher {
    pub fn new(notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self { notifier }
    }

    /// A dispatcher with no executor attached.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.notifier.is_some()
    }

    fn notifier(&self) -> Result<&Arc<dyn Notifier>> {
        self.notifier.as_ref().ok_or(JobdagError::ExecutorUnavailable)
    }

    /// Ask the executor to run `name`.
    pub async fn run_job(&self, name: &str) -> Result<TaskId> {
        let notifier = self.notifier()?;
        debug!(job = %name, "dispatching run to executor");

        match notifier.on_run_job(name).await {
            Ok(task_id) => {
                info!(job = %name, task_id = %task_id, "executor accepted run");
                Ok(task_id)
            }
            Err(err) => {
                warn!(job = %name, error = %err, "executor rejected run");
                Err(JobdagError::Executor(err))
            }
        }
    }

    /// Ask the executor for the status of `task_id`.
    pub async fn status_by_task_id(&self, task_id: &str) -> Result<String> {
        let notifier = self.notifier()?;
        notifier
            .status_by_task_id(task_id)
            .await
            .map_err(JobdagError::Executor)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("attached", &self.is_attached())
            .finish()
    }
}
