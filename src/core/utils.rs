use dirs::{data_dir, home_dir};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::StorageError;

const APP_DIR_NAME: &str = "expense_core";
const HIDDEN_DIR_NAME: &str = ".expense_core";
const COLLECTIONS_DIR: &str = "collections";
const CONFIG_FILE: &str = "config.json";

/// Resolves the on-disk layout used by the JSON backend and the config manager.
pub struct PathResolver;

impl PathResolver {
    /// Platform data directory, e.g. `~/.local/share/expense_core`, falling back
    /// to `~/.expense_core` and finally the working directory.
    pub fn base_dir() -> PathBuf {
        if let Some(dir) = data_dir() {
            return dir.join(APP_DIR_NAME);
        }
        home_dir()
            .map(|home| home.join(HIDDEN_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(".").join(HIDDEN_DIR_NAME))
    }

    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(Self::base_dir)
    }

    pub fn collections_dir_in(base: &Path) -> PathBuf {
        base.join(COLLECTIONS_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> Result<(), StorageError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
