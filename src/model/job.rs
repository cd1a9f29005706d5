// src/model/job.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named unit of work.
///
/// Only `id`, `name` and `create_ts` are interpreted here. Everything else in
/// the payload (command, schedule, executor flags, ...) is kept in
/// `definition` and written back out untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Store-assigned identifier. Ignored on create, pinned on update.
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub name: String,

    /// Creation time in epoch seconds.
    #[serde(default)]
    pub create_ts: i64,

    #[serde(flatten)]
    pub definition: Map<String, Value>,
}

impl Job {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            create_ts: 0,
            definition: Map::new(),
        }
    }

    /// Look up a pass-through definition field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.definition.get(key)
    }
}
