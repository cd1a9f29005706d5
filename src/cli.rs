// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::StoreBackend;

/// Command-line arguments for `jobdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jobdag",
    version,
    about = "Manage scheduler jobs and job DAGs.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Jobdag.toml` in the current working directory, if present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override `[store].backend` (memory, file).
    #[arg(long, global = true, value_name = "BACKEND")]
    pub store: Option<StoreBackend>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JOBDAG_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Standalone job records.
    #[command(subcommand)]
    Job(JobCommand),

    /// DAGs and their nodes.
    #[command(subcommand)]
    Dag(DagCommand),

    /// Hand a job to the executor.
    Run { name: String },

    /// Ask the executor for a task's status.
    Status { task_id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum JobCommand {
    List,
    Get { name: String },
    New(PayloadArgs),
    Update {
        name: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    Remove { name: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum DagCommand {
    List,
    Get { name: String },
    /// Create a DAG. The payload may carry a `jobs` dependency
    /// specification: one `job[,parent]` per line.
    New(PayloadArgs),
    Remove { name: String },
    AddJob {
        name: String,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Remove a node request. Removes the whole DAG.
    RemoveJob { name: String },
    /// Report roots and a topological order, or the first dangling parent
    /// or cycle.
    Check { name: String },
}

/// JSON request body, inline or from a file.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct PayloadArgs {
    /// Inline JSON payload.
    #[arg(long, value_name = "JSON")]
    pub data: Option<String>,

    /// Read the JSON payload from a file.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
