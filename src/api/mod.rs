// src/api/mod.rs

//! Control-plane API.
//!
//! [`ControlPlane`] is the one object a transport layer needs: it is built
//! once at startup from a store and an optional executor, shared behind an
//! `Arc`, and every method returns an [`Envelope`].
//!
//! Names arrive as `Option<&str>` because they come from request parameters;
//! a missing or blank name is answered with `ret = -1`. The other failure
//! codes are fixed per operation:
//!
//! | operation        | -2        | -3          | -4      | -5        |
//! |------------------|-----------|-------------|---------|-----------|
//! | `job_get`        | not found |             |         |           |
//! | `job_new`        | decode    | persist     |         |           |
//! | `job_update`     |           | decode      | persist | not found |
//! | `job_remove`     | persist   | not found   |         |           |
//! | `dag_get`        | not found |             |         |           |
//! | `dag_new`        | decode    | persist     |         |           |
//! | `dag_remove`     | persist   | not found   |         |           |
//! | `dag_job_add`    |           | decode      | persist | not found |
//! | `dag_job_remove` | persist   | not found   |         |           |
//! | `dag_check`      | not found | bad graph   |         |           |
//! | `dag_job_run`    | executor  | unavailable |         |           |
//! | `task_status`    | executor  | unavailable |         |           |
//!
//! "persist" includes name collisions.

pub mod envelope;

pub use envelope::Envelope;

use std::sync::Arc;

use crate::errors::JobdagError;
use crate::exec::{Dispatcher, Notifier};
use crate::manager::{DagManager, JobManager};
use crate::store::Store;

fn required(param: Option<&str>) -> Option<&str> {
    param.map(str::trim).filter(|p| !p.is_empty())
}

fn is_not_found(err: &JobdagError) -> bool {
    matches!(err, JobdagError::NotFound { .. })
}

fn is_decode(err: &JobdagError) -> bool {
    matches!(err, JobdagError::Decode(_))
}

fn is_unavailable(err: &JobdagError) -> bool {
    matches!(err, JobdagError::ExecutorUnavailable)
}

/// Entry point for every transport.
#[derive(Debug)]
pub struct ControlPlane {
    jobs: JobManager,
    dags: DagManager,
    dispatcher: Dispatcher,
}

impl ControlPlane {
    pub fn new(store: Arc<dyn Store>, notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self {
            jobs: JobManager::new(Arc::clone(&store)),
            dags: DagManager::new(store),
            dispatcher: Dispatcher::new(notifier),
        }
    }

    pub fn jobs(&self) -> &JobManager {
        &self.jobs
    }

    pub fn dags(&self) -> &DagManager {
        &self.dags
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /* ---------------- jobs ---------------- */

    pub fn job_list(&self) -> Envelope {
        Envelope::success(&self.jobs.list_jobs())
    }

    pub fn job_get(&self, name: Option<&str>) -> Envelope {
        let Some(name) = required(name) else {
            return Envelope::failure(-1, "job name is needed");
        };
        Envelope::respond(self.jobs.get_job(name), |_| -2)
    }

    pub fn job_new(&self, body: &[u8]) -> Envelope {
        Envelope::respond(self.jobs.create_job(body), |err| {
            if is_decode(err) { -2 } else { -3 }
        })
    }

    pub fn job_update(&self, name: Option<&str>, body: &[u8]) -> Envelope {
        let Some(name) = required(name) else {
            return Envelope::failure(-1, "job name is needed");
        };
        Envelope::respond(self.jobs.update_job(name, body), |err| match err {
            JobdagError::Decode(_) => -3,
            JobdagError::NotFound { .. } => -5,
            _ => -4,
        })
    }

    pub fn job_remove(&self, name: Option<&str>) -> Envelope {
        let Some(name) = required(name) else {
            return Envelope::failure(-1, "job name is needed");
        };
        Envelope::respond(self.jobs.remove_job(name), |err| {
            if is_not_found(err) { -3 } else { -2 }
        })
    }

    /* ---------------- dags ---------------- */

    pub fn dag_list(&self) -> Envelope {
        Envelope::success(&self.dags.list_dags())
    }

    pub fn dag_get(&self, name: Option<&str>) -> Envelope {
        let Some(name) = required(name) else {
            return Envelope::failure(-1, "dag name is needed");
        };
        Envelope::respond(self.dags.get_dag(name), |_| -2)
    }

    pub fn dag_new(&self, body: &[u8]) -> Envelope {
        Envelope::respond(self.dags.create_dag(body), |err| {
            if is_decode(err) { -2 } else { -3 }
        })
    }

    pub fn dag_remove(&self, name: Option<&str>) -> Envelope {
        let Some(name) = required(name) else {
            return Envelope::failure(-1, "dag name is needed");
        };
        Envelope::respond(self.dags.remove_dag(name), |err| {
            if is_not_found(err) { -3 } else { -2 }
        })
    }

    pub fn dag_job_add(&self, name: Option<&str>, body: &[u8]) -> Envelope {
        let Some(name) = required(name) else {
            return Envelope::failure(-1, "dag name is needed");
        };
        Envelope::respond(self.dags.add_dag_job(name, body), |err| match err {
            JobdagError::Decode(_) => -3,
            JobdagError::NotFound { .. } => -5,
            _ => -4,
        })
    }

    /// Removes the whole DAG called `name`; see
    /// [`DagManager::remove_dag_job`].
    pub fn dag_job_remove(&self, name: Option<&str>) -> Envelope {
        let Some(name) = required(name) else {
            return Envelope::failure(-1, "dag name is needed");
        };
        Envelope::respond(self.dags.remove_dag_job(name).map(|()| ""), |err| {
            if is_not_found(err) { -3 } else { -2 }
        })
    }

    pub fn dag_check(&self, name: Option<&str>) -> Envelope {
        let Some(name) = required(name) else {
            return Envelope::failure(-1, "dag name is needed");
        };
        Envelope::respond(self.dags.check_dag(name), |err| {
            if is_not_found(err) { -2 } else { -3 }
        })
    }

    /* ---------------- execution ---------------- */

    pub async fn dag_job_run(&self, name: Option<&str>) -> Envelope {
        let Some(name) = required(name) else {
            return Envelope::failure(-1, "dag job name is needed");
        };
        let result = self.dispatcher.run_job(name).await;
        Envelope::respond(result, |err| if is_unavailable(err) { -3 } else { -2 })
    }

    pub async fn task_status(&self, task_id: Option<&str>) -> Envelope {
        let Some(task_id) = required(task_id) else {
            return Envelope::failure(-1, "task id is needed");
        };
        let result = self.dispatcher.status_by_task_id(task_id).await;
        Envelope::respond(result, |err| if is_unavailable(err) { -3 } else { -2 })
    }
}
