// src/dag/builder.rs

use tracing::debug;

use crate::model::DagJob;

/// Parse a dependency specification into DAG nodes.
///
/// The specification is one node per line, either `job` or `job,parent`.
/// Both tokens are trimmed. Lines whose job name trims to nothing are dropped,
/// so blank lines and stray lines like `,c` produce no node. Tokens after the
/// second comma are ignored.
///
/// Output order follows line order. Parent names are not checked against the
/// other lines and cycles are not detected here; see [`super::resolve`].
pub fn parse_dependency_spec(spec: &str) -> Vec<DagJob> {
    spec.split('\n').filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<DagJob> {
    let mut tokens = line.split(',');
    let job_name = tokens.next().unwrap_or_default().trim();
    if job_name.is_empty() {
        return None;
    }

    let parent_name = tokens.next().map(str::trim).unwrap_or_default();
    let job = DagJob::new(job_name, parent_name);
    debug!(job = %job.job_name, parent = %job.parent_name, "parsed dag job");
    Some(job)
}
