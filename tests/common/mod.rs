#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use bill_tracker::{
    core::{BillStore, FixedClock, RolloverEngine},
    storage::JsonStorage,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated documents directory for a single test.
pub fn temp_data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn storage_in(dir: &PathBuf) -> JsonStorage {
    JsonStorage::in_dir(dir)
}

/// Opens a store whose rollover resolves dates as if today were `date`.
pub fn store_on(dir: &PathBuf, date: (i32, u32, u32)) -> BillStore {
    let today = NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date");
    BillStore::load_with_rollover(
        Box::new(storage_in(dir)),
        RolloverEngine::new(FixedClock::on(today)),
    )
    .expect("load store")
}
