// src/lib.rs

pub mod api;
pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod manager;
pub mod model;
pub mod store;
pub mod types;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::{ControlPlane, Envelope};
use crate::cli::{CliArgs, Command, DagCommand, JobCommand, PayloadArgs};
use crate::config::{ConfigFile, load_or_default};
use crate::fs::{FileSystem, RealFileSystem};
use crate::store::{Store, TableStore};
use crate::types::StoreBackend;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (with the `--store` override applied)
/// - the store
/// - the control plane (no executor is attached from the CLI)
///
/// and runs a single command against it.
pub async fn run(args: CliArgs) -> Result<Envelope> {
    let mut cfg = load_or_default(args.config.as_deref())?;
    if let Some(backend) = args.store {
        cfg.store.backend = backend;
    }

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let store = open_store(&cfg, Arc::clone(&fs))?;
    let plane = ControlPlane::new(store, None);

    execute(&plane, fs.as_ref(), args.command).await
}

/// Build the store described by `[store]`.
pub fn open_store(cfg: &ConfigFile, fs: Arc<dyn FileSystem>) -> Result<Arc<dyn Store>> {
    let store = match cfg.store.backend {
        StoreBackend::Memory => {
            debug!("using in-memory store");
            TableStore::in_memory()
        }
        StoreBackend::File => {
            info!(dir = ?cfg.store.dir, "using file-backed store");
            TableStore::open(fs, &cfg.store.dir)
                .with_context(|| format!("opening store in {:?}", cfg.store.dir))?
        }
    };
    Ok(Arc::new(store))
}

/// Run one CLI command against `plane`.
pub async fn execute(plane: &ControlPlane, fs: &dyn FileSystem, command: Command) -> Result<Envelope> {
    let envelope = match command {
        Command::Job(cmd) => match cmd {
            JobCommand::List => plane.job_list(),
            JobCommand::Get { name } => plane.job_get(Some(name.as_str())),
            JobCommand::New(payload) => plane.job_new(&read_payload(fs, &payload)?),
            JobCommand::Update { name, payload } => {
                plane.job_update(Some(name.as_str()), &read_payload(fs, &payload)?)
            }
            JobCommand::Remove { name } => plane.job_remove(Some(name.as_str())),
        },
        Command::Dag(cmd) => match cmd {
            DagCommand::List => plane.dag_list(),
            DagCommand::Get { name } => plane.dag_get(Some(name.as_str())),
            DagCommand::New(payload) => plane.dag_new(&read_payload(fs, &payload)?),
            DagCommand::Remove { name } => plane.dag_remove(Some(name.as_str())),
            DagCommand::AddJob { name, payload } => {
                plane.dag_job_add(Some(name.as_str()), &read_payload(fs, &payload)?)
            }
            DagCommand::RemoveJob { name } => plane.dag_job_remove(Some(name.as_str())),
            DagCommand::Check { name } => plane.dag_check(Some(name.as_str())),
        },
        Command::Run { name } => plane.dag_job_run(Some(name.as_str())).await,
        Command::Status { task_id } => plane.task_status(Some(task_id.as_str())).await,
    };
    Ok(envelope)
}

fn read_payload(fs: &dyn FileSystem, payload: &PayloadArgs) -> Result<Vec<u8>> {
    match (&payload.data, &payload.file) {
        (Some(data), _) => Ok(data.clone().into_bytes()),
        (None, Some(path)) => Ok(fs.read_to_string(path)?.into_bytes()),
        (None, None) => anyhow::bail!("either --data or --file is required"),
    }
}
