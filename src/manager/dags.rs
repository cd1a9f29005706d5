// src/manager/dags.rs

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::dag::{DagTopology, parse_dependency_spec, resolve};
use crate::errors::{JobdagError, Result};
use crate::manager::normalize_name;
use crate::model::{CreateDagRequest, DagJob, DagMeta, now_ts};
use crate::store::{KeyLocks, Store};
use crate::types::EntityKind;

/// Lifecycle of [`DagMeta`] aggregates and their nodes.
#[derive(Debug)]
pub struct DagManager {
    store: Arc<dyn Store>,
    locks: KeyLocks,
}

impl DagManager {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            locks: KeyLocks::new(),
        }
    }

    /// All DAGs with their nodes, ordered by id. A store failure is logged
    /// and reported as an empty listing.
    pub fn list_dags(&self) -> Vec<DagMeta> {
        match self.store.dags().list_all() {
            Ok(dags) => dags,
            Err(err) => {
                warn!(error = %err, "listing dags failed; returning empty list");
                Vec::new()
            }
        }
    }

    pub fn get_dag(&self, name: &str) -> Result<DagMeta> {
        self.store
            .dags()
            .find_by_name(name)?
            .ok_or_else(|| JobdagError::not_found(EntityKind::Dag, name))
    }

    /// Decode a [`CreateDagRequest`], build its nodes and insert the DAG.
    ///
    /// Nodes listed in `dag_jobs` come first, followed by the nodes parsed
    /// from the `jobs` dependency specification.
    pub fn create_dag(&self, payload: &[u8]) -> Result<DagMeta> {
        let mut request: CreateDagRequest = serde_json::from_slice(payload)?;
        normalize_name(EntityKind::Dag, &mut request.name)?;

        let mut dag = DagMeta::new(request.name);
        for job in request.dag_jobs {
            dag.push_job(normalize_dag_job(job)?);
        }
        if let Some(spec) = request.jobs.as_deref() {
            for job in parse_dependency_spec(spec) {
                dag.push_job(job);
            }
        }
        dag.create_ts = now_ts();

        let name = dag.name.clone();
        let dag = self
            .locks
            .with_key(&name, || self.store.dags().insert(dag))?;

        info!(dag = %dag.name, id = dag.id, nodes = dag.dag_jobs.len(), "dag created");
        Ok(dag)
    }

    /// Append one node to the DAG called `dag_name` and persist it.
    ///
    /// The DAG must exist before the payload is even looked at. Both names
    /// are trimmed, as the dependency specification parser does. If the
    /// store rejects the write the DAG keeps its previous nodes.
    pub fn add_dag_job(&self, dag_name: &str, payload: &[u8]) -> Result<DagJob> {
        self.locks.with_key(dag_name, || {
            let mut dag = self.get_dag(dag_name)?;

            let job = normalize_dag_job(serde_json::from_slice(payload)?)?;

            dag.push_job(job.clone());
            self.store.dags().update(&dag)?;
            debug!(
                dag = %dag_name,
                job = %job.job_name,
                parent = %job.parent_name,
                nodes = dag.dag_jobs.len(),
                "dag job added"
            );
            Ok(job)
        })
    }

    /// Handle a "remove dag node" request.
    ///
    /// The request only names the DAG, and the whole DAG is removed.
    pub fn remove_dag_job(&self, dag_name: &str) -> Result<()> {
        warn!(dag = %dag_name, "remove dag node carries no node name; removing the whole dag");
        self.remove_dag(dag_name).map(|_| ())
    }

    /// Delete the DAG called `dag_name` and return what was removed.
    pub fn remove_dag(&self, dag_name: &str) -> Result<DagMeta> {
        self.locks.with_key(dag_name, || {
            let dag = self.get_dag(dag_name)?;
            self.store.dags().delete(&dag)?;
            info!(dag = %dag_name, id = dag.id, "dag removed");
            Ok(dag)
        })
    }

    /// Check the stored nodes of `dag_name` for dangling parents and cycles.
    pub fn check_dag(&self, dag_name: &str) -> Result<DagTopology> {
        let dag = self.get_dag(dag_name)?;
        resolve(&dag)
    }
}

fn normalize_dag_job(job: DagJob) -> Result<DagJob> {
    let job_name = job.job_name.trim();
    if job_name.is_empty() {
        return Err(JobdagError::Decode("dag job name must not be empty".to_string()));
    }
    Ok(DagJob::new(job_name, job.parent_name.trim()))
}
