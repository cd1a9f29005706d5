// src/manager/mod.rs

//! Entity managers: validation and persistence lifecycle for jobs and DAGs.
//!
//! Both managers own a [`KeyLocks`](crate::store::KeyLocks) registry so that
//! every lookup-then-mutate sequence on a name is serialized.

pub mod dags;
pub mod jobs;

pub use dags::DagManager;
pub use jobs::JobManager;

use crate::errors::{JobdagError, Result};
use crate::types::EntityKind;

/// Trim `name` in place and reject it if nothing is left.
///
/// Stored names are always trimmed; the control plane trims lookups too.
fn normalize_name(kind: EntityKind, name: &mut String) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(JobdagError::Decode(format!("{kind} name must not be empty")));
    }
    if trimmed.len() != name.len() {
        *name = trimmed.to_string();
    }
    Ok(())
}
