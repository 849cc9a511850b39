#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use expense_core::{
    config::ConfigManager, domain::common::chrono::NaiveDate, storage::JsonStorage, ExpenseStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique base directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates an isolated JSON-backed store and a config manager sharing one base directory.
pub fn setup_test_env() -> (ExpenseStore, ConfigManager, PathBuf) {
    let base = temp_base();
    let storage = JsonStorage::new(Some(base.clone())).expect("create json storage backend");
    let store = ExpenseStore::open(Box::new(storage));
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (store, config_manager, base)
}

/// Re-opens the JSON store rooted at `base`, as a fresh app launch would.
pub fn reopen(base: &PathBuf) -> ExpenseStore {
    let storage = JsonStorage::new(Some(base.clone())).expect("reopen json storage backend");
    ExpenseStore::open(Box::new(storage))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
