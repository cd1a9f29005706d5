// src/model/dag.rs

use serde::{Deserialize, Serialize};

/// One node of a DAG: a job name plus the name of the job it runs after.
///
/// An empty `parent_name` marks a root node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DagJob {
    pub job_name: String,

    #[serde(default)]
    pub parent_name: String,
}

impl DagJob {
    pub fn new(job_name: impl Into<String>, parent_name: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            parent_name: parent_name.into(),
        }
    }

    pub fn root(job_name: impl Into<String>) -> Self {
        Self::new(job_name, "")
    }

    pub fn is_root(&self) -> bool {
        self.parent_name.is_empty()
    }
}

/// A named DAG and its nodes, in insertion order.
///
/// Nodes are never deduplicated: adding the same `job_name` twice keeps both
/// entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DagMeta {
    #[serde(default)]
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub create_ts: i64,

    #[serde(default)]
    pub dag_jobs: Vec<DagJob>,
}

impl DagMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            create_ts: 0,
            dag_jobs: Vec::new(),
        }
    }

    /// Append a node in memory. Persisting is the caller's job.
    pub fn push_job(&mut self, job: DagJob) {
        self.dag_jobs.push(job);
    }

    pub fn job_names(&self) -> impl Iterator<Item = &str> {
        self.dag_jobs.iter().map(|j| j.job_name.as_str())
    }
}

/// Payload accepted by "create dag".
///
/// ```json
/// {
///   "name": "nightly",
///   "jobs": "extract\ntransform,extract\nload,transform"
/// }
/// ```
///
/// `jobs` is the newline/comma dependency specification handled by
/// [`crate::dag::parse_dependency_spec`]. `dag_jobs` may carry nodes directly;
/// they are added before the parsed ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDagRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub jobs: Option<String>,

    #[serde(default)]
    pub dag_jobs: Vec<DagJob>,
}
