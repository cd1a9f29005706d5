// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::StoreBackend;

/// Configuration exactly as read from TOML, before validation.
///
/// ```toml
/// [store]
/// backend = "file"
/// dir = ".jobdag"
/// ```
///
/// Every section is optional; an empty file means an in-memory store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub store: StoreSection,
}

/// `[store]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// `"memory"` (default) or `"file"`.
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory holding `jobs.json` and `dags.json` for the file backend.
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(".jobdag")
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            dir: default_store_dir(),
        }
    }
}

/// Validated configuration. Only obtainable through
/// `ConfigFile::try_from(RawConfigFile)` or the loader functions.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub store: StoreSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(store: StoreSection) -> Self {
        Self { store }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(StoreSection::default())
    }
}
