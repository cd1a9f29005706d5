// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::types::EntityKind;

#[derive(Error, Debug)]
pub enum JobdagError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("no such {kind}: {name}")]
    NotFound { kind: EntityKind, name: String },

    #[error("{kind} '{name}' already exists")]
    UniqueConstraint { kind: EntityKind, name: String },

    #[error("persist error: {0}")]
    Persist(String),

    #[error("notifier not found")]
    ExecutorUnavailable,

    /// Error relayed from the executor; displayed exactly as the executor
    /// reported it.
    #[error("{0}")]
    Executor(anyhow::Error),

    #[error("job '{job}' in dag '{dag}' has unknown parent '{parent}'")]
    UnknownParent {
        dag: String,
        job: String,
        parent: String,
    },

    #[error("Cycle detected in DAG: {0}")]
    DagCycle(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl From<serde_json::Error> for JobdagError {
    fn from(err: serde_json::Error) -> Self {
        JobdagError::Decode(err.to_string())
    }
}

impl JobdagError {
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        JobdagError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn persist(err: impl std::fmt::Display) -> Self {
        JobdagError::Persist(format!("{err:#}"))
    }
}

pub type Result<T> = std::result::Result<T, JobdagError>;
