// src/dag/mod.rs

//! DAG construction.
//!
//! - [`builder`] turns a newline/comma dependency specification into
//!   [`DagJob`](crate::model::DagJob) nodes. Purely syntactic.
//! - [`resolve`] checks stored nodes for dangling parents and cycles when
//!   asked to.

pub mod builder;
pub mod resolve;

pub use builder::parse_dependency_spec;
pub use resolve::{DagTopology, resolve};
