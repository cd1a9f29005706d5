// src/manager/jobs.rs

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::{JobdagError, Result};
use crate::manager::normalize_name;
use crate::model::{Job, now_ts};
use crate::store::{KeyLocks, Store};
use crate::types::EntityKind;

/// Lifecycle of standalone [`Job`] records.
#[derive(Debug)]
pub struct JobManager {
    store: Arc<dyn Store>,
    locks: KeyLocks,
}

impl JobManager {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            locks: KeyLocks::new(),
        }
    }

    /// All jobs, ordered by id. A store failure is logged and reported as an
    /// empty listing.
    pub fn list_jobs(&self) -> Vec<Job> {
        match self.store.jobs().list_all() {
            Ok(jobs) => jobs,
            Err(err) => {
                warn!(error = %err, "listing jobs failed; returning empty list");
                Vec::new()
            }
        }
    }

    pub fn get_job(&self, name: &str) -> Result<Job> {
        self.store
            .jobs()
            .find_by_name(name)?
            .ok_or_else(|| JobdagError::not_found(EntityKind::Job, name))
    }

    /// Decode `payload` into a new job, stamp `create_ts` and insert it.
    pub fn create_job(&self, payload: &[u8]) -> Result<Job> {
        let mut job: Job = serde_json::from_slice(payload)?;
        normalize_name(EntityKind::Job, &mut job.name)?;
        job.create_ts = now_ts();

        let name = job.name.clone();
        let job = self
            .locks
            .with_key(&name, || self.store.jobs().insert(job))?;

        info!(job = %job.name, id = job.id, "job created");
        Ok(job)
    }

    /// Replace the definition of the job called `name`.
    ///
    /// The stored `id` and `create_ts` always win over whatever the payload
    /// carries. A payload without a name keeps the current one; a different
    /// name (trimmed) renames the job.
    pub fn update_job(&self, name: &str, payload: &[u8]) -> Result<Job> {
        self.locks.with_key(name, || {
            let existing = self.get_job(name)?;

            let mut job: Job = serde_json::from_slice(payload)?;
            if job.name.trim().is_empty() {
                job.name = existing.name.clone();
            } else {
                normalize_name(EntityKind::Job, &mut job.name)?;
            }
            job.id = existing.id;
            job.create_ts = existing.create_ts;

            self.store.jobs().update(&job)?;
            debug!(job = %name, id = job.id, new_name = %job.name, "job updated");
            Ok(job)
        })
    }

    /// Delete the job called `name` and return what was removed.
    pub fn remove_job(&self, name: &str) -> Result<Job> {
        self.locks.with_key(name, || {
            let job = self.get_job(name)?;
            self.store.jobs().delete(&job)?;
            info!(job = %name, id = job.id, "job removed");
            Ok(job)
        })
    }
}
