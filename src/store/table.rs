// src/store/table.rs

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{JobdagError, Result};
use crate::fs::FileSystem;
use crate::model::{DagMeta, Job};
use crate::store::{Record, Store, Table};

/// On-disk form of one table.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot<R> {
    next_id: i64,
    rows: Vec<R>,
}

#[derive(Debug, Clone)]
struct TableState<R> {
    next_id: i64,
    rows: BTreeMap<i64, R>,
}

impl<R: Record> TableState<R> {
    fn empty() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }

    fn find_by_name(&self, name: &str) -> Option<&R> {
        self.rows.values().find(|r| r.name() == name)
    }

    fn snapshot(&self) -> Snapshot<&R> {
        Snapshot {
            next_id: self.next_id,
            rows: self.rows.values().collect(),
        }
    }
}

/// Where a table writes its snapshot after every mutation.
#[derive(Debug)]
struct SnapshotSink {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

/// One entity table.
///
/// Mutations are applied to a copy of the current rows, written to the
/// snapshot sink (if any), and only then made visible. A failed write leaves
/// the table exactly as it was.
pub struct RecordTable<R> {
    state: Mutex<TableState<R>>,
    sink: Option<SnapshotSink>,
}

impl<R: Record> RecordTable<R> {
    pub fn in_memory() -> Self {
        Self {
            state: Mutex::new(TableState::empty()),
            sink: None,
        }
    }

    /// Open a table persisted at `path`, loading the existing snapshot if
    /// there is one.
    pub fn open(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if fs.exists(&path) {
            let contents = fs.read_to_string(&path).map_err(JobdagError::persist)?;
            let snapshot: Snapshot<R> = serde_json::from_str(&contents).map_err(|e| {
                JobdagError::Persist(format!("corrupt {} snapshot {:?}: {e}", R::KIND, path))
            })?;
            info!(kind = %R::KIND, rows = snapshot.rows.len(), path = ?path, "loaded table snapshot");
            TableState {
                next_id: snapshot.next_id,
                rows: snapshot.rows.into_iter().map(|r| (r.id(), r)).collect(),
            }
        } else {
            debug!(kind = %R::KIND, path = ?path, "no snapshot yet; starting empty");
            TableState::empty()
        };

        Ok(Self {
            state: Mutex::new(state),
            sink: Some(SnapshotSink { fs, path }),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, TableState<R>>> {
        self.state
            .lock()
            .map_err(|_| JobdagError::Persist(format!("{} table lock poisoned", R::KIND)))
    }

    /// Persist `next` and swap it in.
    fn commit(&self, current: &mut TableState<R>, next: TableState<R>) -> Result<()> {
        if let Some(sink) = &self.sink {
            let bytes = serde_json::to_vec_pretty(&next.snapshot()).map_err(JobdagError::persist)?;
            sink.fs
                .write(&sink.path, &bytes)
                .map_err(JobdagError::persist)?;
        }
        *current = next;
        Ok(())
    }

    fn check_unique(state: &TableState<R>, record: &R) -> Result<()> {
        match state.find_by_name(record.name()) {
            Some(existing) if existing.id() != record.id() => Err(JobdagError::UniqueConstraint {
                kind: R::KIND,
                name: record.name().to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl<R: Record> Table<R> for RecordTable<R> {
    fn insert(&self, mut record: R) -> Result<R> {
        let mut state = self.lock()?;
        // Fresh rows never carry an id that could collide with an existing one.
        record.set_id(0);
        Self::check_unique(&state, &record)?;

        let mut next = state.clone();
        record.set_id(next.next_id);
        next.next_id += 1;
        next.rows.insert(record.id(), record.clone());

        self.commit(&mut state, next)?;
        Ok(record)
    }

    fn update(&self, record: &R) -> Result<()> {
        let mut state = self.lock()?;
        if !state.rows.contains_key(&record.id()) {
            return Err(JobdagError::not_found(R::KIND, record.name()));
        }
        Self::check_unique(&state, record)?;

        let mut next = state.clone();
        next.rows.insert(record.id(), record.clone());
        self.commit(&mut state, next)
    }

    fn delete(&self, record: &R) -> Result<()> {
        let mut state = self.lock()?;
        if !state.rows.contains_key(&record.id()) {
            return Err(JobdagError::not_found(R::KIND, record.name()));
        }

        let mut next = state.clone();
        next.rows.remove(&record.id());
        self.commit(&mut state, next)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<R>> {
        let state = self.lock()?;
        Ok(state.find_by_name(name).cloned())
    }

    fn list_all(&self) -> Result<Vec<R>> {
        let state = self.lock()?;
        Ok(state.rows.values().cloned().collect())
    }
}

impl<R> fmt::Debug for RecordTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordTable")
            .field("persisted", &self.sink.as_ref().map(|s| &s.path))
            .finish_non_exhaustive()
    }
}

/// [`Store`] made of one [`RecordTable`] per entity kind.
#[derive(Debug)]
pub struct TableStore {
    jobs: RecordTable<Job>,
    dags: RecordTable<DagMeta>,
}

impl TableStore {
    pub const JOBS_FILE: &'static str = "jobs.json";
    pub const DAGS_FILE: &'static str = "dags.json";

    pub fn in_memory() -> Self {
        Self {
            jobs: RecordTable::in_memory(),
            dags: RecordTable::in_memory(),
        }
    }

    /// Open a store whose tables are snapshotted under `dir`.
    pub fn open(fs: Arc<dyn FileSystem>, dir: &Path) -> Result<Self> {
        Ok(Self {
            jobs: RecordTable::open(Arc::clone(&fs), dir.join(Self::JOBS_FILE))?,
            dags: RecordTable::open(fs, dir.join(Self::DAGS_FILE))?,
        })
    }
}

impl Store for TableStore {
    fn jobs(&self) -> &dyn Table<Job> {
        &self.jobs
    }

    fn dags(&self) -> &dyn Table<DagMeta> {
        &self.dags
    }
}
