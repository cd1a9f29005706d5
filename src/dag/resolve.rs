// src/dag/resolve.rs

//! On-demand topology check for a stored DAG.
//!
//! Creating a DAG or adding a node never validates parent references or
//! cycles. This module answers the explicit "check dag" request: it builds a
//! graph from the nodes and reports either a valid ordering or the first
//! problem found.

use std::collections::HashSet;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use serde::Serialize;

use crate::errors::{JobdagError, Result};
use crate::model::DagMeta;

/// Shape of a DAG whose nodes form a valid acyclic graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DagTopology {
    pub dag: String,
    /// Jobs with no parent edge, in first-seen order.
    pub roots: Vec<String>,
    /// A topological order: every parent precedes its children.
    pub order: Vec<String>,
}

/// Resolve the nodes of `dag` into a [`DagTopology`].
///
/// Edge direction is parent -> child. A job listed more than once
/// contributes one vertex and the union of its edges.
pub fn resolve(dag: &DagMeta) -> Result<DagTopology> {
    let known: HashSet<&str> = dag.job_names().collect();
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in dag.job_names() {
        graph.add_node(name);
    }

    for job in dag.dag_jobs.iter().filter(|j| !j.is_root()) {
        if !known.contains(job.parent_name.as_str()) {
            return Err(JobdagError::UnknownParent {
                dag: dag.name.clone(),
                job: job.job_name.clone(),
                parent: job.parent_name.clone(),
            });
        }
        graph.add_edge(job.parent_name.as_str(), job.job_name.as_str(), ());
    }

    let order = match toposort(&graph, None) {
        Ok(order) => order,
        Err(cycle) => {
            return Err(JobdagError::DagCycle(format!(
                "cycle detected in dag '{}' involving job '{}'",
                dag.name,
                cycle.node_id()
            )));
        }
    };

    let roots = graph
        .nodes()
        .filter(|&n| {
            graph
                .neighbors_directed(n, Direction::Incoming)
                .next()
                .is_none()
        })
        .map(str::to_string)
        .collect();

    Ok(DagTopology {
        dag: dag.name.clone(),
        roots,
        order: order.into_iter().map(str::to_string).collect(),
    })
}
