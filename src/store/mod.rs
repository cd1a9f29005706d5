// src/store/mod.rs

//! Store adapter.
//!
//! The entity managers only talk to the [`Store`] trait: one [`Table`] per
//! entity kind with keyed CRUD and name uniqueness. [`TableStore`] is the
//! implementation shipped with the crate, either purely in memory or backed
//! by JSON snapshots on a [`FileSystem`](crate::fs::FileSystem).
//!
//! - [`table`] implements a single table.
//! - [`locks`] serializes check-then-act sequences per entity name.

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::Result;
use crate::model::{DagMeta, Job};
use crate::types::EntityKind;

pub mod locks;
pub mod table;

pub use locks::KeyLocks;
pub use table::{RecordTable, TableStore};

/// A row type that can live in a [`Table`].
pub trait Record: Clone + Send + Serialize + DeserializeOwned + 'static {
    const KIND: EntityKind;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn name(&self) -> &str;
}

impl Record for Job {
    const KIND: EntityKind = EntityKind::Job;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for DagMeta {
    const KIND: EntityKind = EntityKind::Dag;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Keyed CRUD over one entity kind.
///
/// Every method is atomic on its own. Implementations must reject a second
/// row with an existing name, both on insert and on an update that renames.
pub trait Table<R: Record>: Send + Sync {
    /// Insert `record`, assigning it a fresh id, and return the stored row.
    fn insert(&self, record: R) -> Result<R>;
    /// Replace the row with `record.id()`.
    fn update(&self, record: &R) -> Result<()>;
    /// Delete the row with `record.id()`.
    fn delete(&self, record: &R) -> Result<()>;
    fn find_by_name(&self, name: &str) -> Result<Option<R>>;
    /// All rows, ordered by id.
    fn list_all(&self) -> Result<Vec<R>>;
}

/// Persistence backend for all entity kinds.
pub trait Store: Send + Sync + Debug {
    fn jobs(&self) -> &dyn Table<Job>;
    fn dags(&self) -> &dyn Table<DagMeta>;
}
