use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::anyhow;
use jobdag::exec::{Notifier, NotifierFuture, TaskId};

/// A fake executor that:
/// - records which jobs were asked to run
/// - hands out sequential task ids (`task-1`, `task-2`, ...)
/// - reports `"running"` for every task it started, unless overridden
/// - or, when built with [`FakeNotifier::failing`], rejects every call.
#[derive(Default)]
pub struct FakeNotifier {
    runs: Mutex<Vec<String>>,
    statuses: Mutex<HashMap<TaskId, String>>,
    failure: Option<String>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            failure: Some(msg.to_string()),
            ..Self::default()
        }
    }

    /// Names passed to `on_run_job`, in call order.
    pub fn runs(&self) -> Vec<String> {
        self.runs.lock().unwrap().clone()
    }

    pub fn set_status(&self, task_id: &str, status: &str) {
        self.statuses
            .lock()
            .unwrap()
            .insert(task_id.to_string(), status.to_string());
    }
}

impl Notifier for FakeNotifier {
    fn on_run_job<'a>(&'a self, name: &'a str) -> NotifierFuture<'a, TaskId> {
        Box::pin(async move {
            if let Some(msg) = &self.failure {
                return Err(anyhow!("{msg}"));
            }

            let task_id = {
                let mut runs = self.runs.lock().unwrap();
                runs.push(name.to_string());
                format!("task-{}", runs.len())
            };
            self.statuses
                .lock()
                .unwrap()
                .insert(task_id.clone(), "running".to_string());
            Ok(task_id)
        })
    }

    fn status_by_task_id<'a>(&'a self, task_id: &'a str) -> NotifierFuture<'a, String> {
        Box::pin(async move {
            if let Some(msg) = &self.failure {
                return Err(anyhow!("{msg}"));
            }

            self.statuses
                .lock()
                .unwrap()
                .get(task_id)
                .cloned()
                .ok_or_else(|| anyhow!("no such task: {task_id}"))
        })
    }
}
