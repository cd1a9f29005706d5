// src/model/mod.rs

//! Persisted entities.
//!
//! - [`job`] holds the standalone [`Job`] record.
//! - [`dag`] holds [`DagMeta`], its [`DagJob`] nodes, and the
//!   [`CreateDagRequest`] payload used to build one.

pub mod dag;
pub mod job;

pub use dag::{CreateDagRequest, DagJob, DagMeta};
pub use job::Job;

/// Current time as epoch seconds, used for `create_ts` stamps.
pub fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}
