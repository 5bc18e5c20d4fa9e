mod common;

use std::fs;

use bill_tracker::{
    core::{BillError, BillStore, StoreState},
    domain::{Balance, Bill},
    storage::{JsonStorage, StorageBackend, StoragePaths, BALANCE_FILE, BILLS_FILE},
    utils::persistence::tmp_path,
};
use common::{storage_in, temp_data_dir};

#[test]
fn failed_write_preserves_original_file() {
    let dir = temp_data_dir();
    let mut store = BillStore::load(Box::new(storage_in(&dir))).expect("load");
    let bills_path = dir.join(BILLS_FILE);
    let original = fs::read_to_string(&bills_path).expect("read original file");

    // A directory at the staging path makes File::create fail.
    let staging = tmp_path(&bills_path);
    fs::create_dir_all(&staging).unwrap();

    store.toggle_paid(0).unwrap();
    let result = store.persist();

    assert!(matches!(result, Err(BillError::StorageError(_))));
    assert_eq!(
        fs::read_to_string(&bills_path).expect("read after failure"),
        original,
        "failed save must not corrupt the original file"
    );
    assert_eq!(store.state(), StoreState::Dirty);

    fs::remove_dir_all(&staging).unwrap();
    store.persist().expect("save succeeds once the path is clear");
    assert_eq!(store.state(), StoreState::Persisted);
}

#[test]
fn documents_are_not_written_transactionally() {
    let dir = temp_data_dir();
    let storage = storage_in(&dir);
    storage.save_bills(&[Bill::new("a", "04/01", 1.0)]).unwrap();
    storage.save_balance(&Balance::new(10.0)).unwrap();
    let mut store = BillStore::load(Box::new(storage.clone())).expect("load");

    fs::create_dir_all(tmp_path(&dir.join(BALANCE_FILE))).unwrap();
    store.toggle_paid(0).unwrap();
    store.adjust_balance(5.0);
    assert!(store.persist().is_err());

    // The bills document was replaced before the balance write failed.
    let bills = storage.load_bills().unwrap().unwrap();
    assert!(bills[0].paid);
    assert_eq!(storage.load_balance().unwrap(), Some(Balance::new(10.0)));
}

#[test]
fn custom_paths_are_respected() {
    let dir = temp_data_dir();
    let paths = StoragePaths {
        bills_file: dir.join("nested").join("due.json"),
        balance_file: dir.join("funds.json"),
    };
    let storage = JsonStorage::new(paths.clone());

    let mut store = BillStore::load(Box::new(storage)).expect("load");
    store.add_funds(12.0).unwrap();
    store.persist().expect("persist");

    assert!(paths.bills_file.exists());
    let balance: Balance =
        serde_json::from_str(&fs::read_to_string(&paths.balance_file).unwrap()).unwrap();
    assert_eq!(balance, Balance::new(12.0));
}

#[test]
fn balance_document_is_a_single_field_record() {
    let dir = temp_data_dir();
    let mut store = BillStore::load(Box::new(storage_in(&dir))).expect("load");
    store.add_funds(250.5).unwrap();
    store.subtract_funds(0.5).unwrap();
    store.persist().expect("persist");

    let raw = fs::read_to_string(dir.join(BALANCE_FILE)).unwrap();
    assert_eq!(raw, r#"{"balance":250.0}"#);
}
