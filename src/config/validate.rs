// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{JobdagError, Result};
use crate::types::StoreBackend;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::JobdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.store))
    }
}

/// Check the semantic rules serde cannot express.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_store(cfg)?;
    Ok(())
}

fn validate_store(cfg: &RawConfigFile) -> Result<()> {
    if cfg.store.backend != StoreBackend::File {
        return Ok(());
    }

    if cfg.store.dir.as_os_str().is_empty() {
        return Err(JobdagError::ConfigError(
            "[store].dir must be set when backend = \"file\"".to_string(),
        ));
    }

    if cfg.store.dir.is_file() {
        return Err(JobdagError::ConfigError(format!(
            "[store].dir {:?} is a file, expected a directory",
            cfg.store.dir
        )));
    }

    Ok(())
}
