//! The in-memory bill list and balance, with controlled mutation and
//! validate-then-persist saves.
//!
//! Rows are addressed by their 0-based position. Deleting a row shifts every
//! later row down by one, so callers must re-derive indices after a delete.

use tracing::{debug, info, warn};

use crate::{
    core::{
        errors::{BillError, Result},
        rollover::RolloverEngine,
        totals::{compute_totals, Totals},
        validation::{validate_rows, RowError},
    },
    domain::{sample_bills, Balance, Bill, BillDraft},
    storage::StorageBackend,
};

/// Lifecycle of the in-memory model relative to the persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Freshly read from disk, untouched.
    Loaded,
    /// Changed in memory since the last load or save.
    Dirty,
    /// Matches what was last written.
    Persisted,
}

/// A single-field edit applied to an existing row.
#[derive(Debug, Clone, PartialEq)]
pub enum BillEdit {
    Name(String),
    DueDate(String),
    Amount(String),
    Paid(bool),
}

pub struct BillStore {
    storage: Box<dyn StorageBackend>,
    rollover: RolloverEngine,
    rows: Vec<BillDraft>,
    balance: Balance,
    state: StoreState,
}

impl BillStore {
    /// Loads both documents, bootstrapping the bills document with sample
    /// data when it does not exist yet.
    pub fn load(storage: Box<dyn StorageBackend>) -> Result<Self> {
        Self::load_with_rollover(storage, RolloverEngine::default())
    }

    pub fn load_with_rollover(
        storage: Box<dyn StorageBackend>,
        rollover: RolloverEngine,
    ) -> Result<Self> {
        let (rows, balance) = read_snapshot(storage.as_ref())?;
        Ok(Self {
            storage,
            rollover,
            rows,
            balance,
            state: StoreState::Loaded,
        })
    }

    /// Re-reads both documents. On failure the in-memory model is unchanged.
    pub fn reload(&mut self) -> Result<()> {
        let (rows, balance) = read_snapshot(self.storage.as_ref())?;
        self.rows = rows;
        self.balance = balance;
        self.state = StoreState::Loaded;
        Ok(())
    }

    pub fn bills(&self) -> &[BillDraft] {
        &self.rows
    }

    pub fn bill(&self, index: usize) -> Result<&BillDraft> {
        let len = self.rows.len();
        self.rows
            .get(index)
            .ok_or(BillError::IndexOutOfRange { index, len })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == StoreState::Dirty
    }

    pub fn storage_location(&self) -> String {
        self.storage.describe()
    }

    /// Appends a row. Rows are not validated until the next save.
    pub fn add_bill(&mut self, bill: impl Into<BillDraft>) -> usize {
        self.rows.push(bill.into());
        self.mark_dirty();
        self.rows.len() - 1
    }

    pub fn add_blank_bill(&mut self) -> usize {
        self.add_bill(BillDraft::blank())
    }

    /// Removes and returns the row at `index`; later rows shift down by one.
    pub fn delete_bill(&mut self, index: usize) -> Result<BillDraft> {
        self.ensure_index(index)?;
        let removed = self.rows.remove(index);
        self.mark_dirty();
        debug!(index, name = %removed.name, "bill removed");
        Ok(removed)
    }

    pub fn update_bill(&mut self, index: usize, edit: BillEdit) -> Result<()> {
        self.ensure_index(index)?;
        let row = &mut self.rows[index];
        match edit {
            BillEdit::Name(name) => row.name = name,
            BillEdit::DueDate(due_date) => row.due_date = due_date,
            BillEdit::Amount(amount) => row.amount = amount,
            BillEdit::Paid(paid) => row.paid = paid,
        }
        self.mark_dirty();
        Ok(())
    }

    /// Flips the paid flag and returns the new value.
    pub fn toggle_paid(&mut self, index: usize) -> Result<bool> {
        self.ensure_index(index)?;
        let row = &mut self.rows[index];
        row.paid = !row.paid;
        let paid = row.paid;
        self.mark_dirty();
        Ok(paid)
    }

    /// Applies a signed delta to the balance. No floor at zero.
    pub fn adjust_balance(&mut self, delta: f64) {
        self.balance.apply(delta);
        self.mark_dirty();
    }

    pub fn add_funds(&mut self, amount: f64) -> Result<()> {
        let amount = positive_amount(amount)?;
        self.adjust_balance(amount);
        Ok(())
    }

    pub fn subtract_funds(&mut self, amount: f64) -> Result<()> {
        let amount = positive_amount(amount)?;
        self.adjust_balance(-amount);
        Ok(())
    }

    pub fn compute_totals(&self) -> Totals {
        compute_totals(&self.rows, &self.balance)
    }

    pub fn validate_and_collect(&self) -> std::result::Result<Vec<Bill>, Vec<RowError>> {
        validate_rows(&self.rows)
    }

    /// Validates every row and, only if all pass, overwrites both documents.
    ///
    /// On success the rows are reloaded from the saved bills, so amounts are
    /// shown with two decimals from then on. Extra precision is written once
    /// and rounded to cents by the next save; this is intended.
    pub fn persist(&mut self) -> Result<()> {
        let bills = self.validate_and_collect().map_err(|errors| {
            warn!(count = errors.len(), "save rejected by validation");
            BillError::Validation(errors)
        })?;
        self.write_snapshot(bills, self.balance)
    }

    /// Advances every due date by one month, clears paid flags, zeroes the
    /// balance and saves. If the rolled rows fail validation nothing changes,
    /// in memory or on disk.
    pub fn rollover(&mut self) -> Result<()> {
        let (rolled, balance) = self.rollover.roll(&self.rows);
        let bills = validate_rows(&rolled).map_err(|errors| {
            warn!(count = errors.len(), "rollover rejected by validation");
            BillError::Validation(errors)
        })?;
        self.write_snapshot(bills, balance)?;
        info!(bills = self.rows.len(), "rolled over to next month");
        Ok(())
    }

    fn write_snapshot(&mut self, bills: Vec<Bill>, balance: Balance) -> Result<()> {
        self.storage.save_bills(&bills)?;
        self.storage.save_balance(&balance)?;
        info!(
            bills = bills.len(),
            balance = balance.balance,
            location = %self.storage.describe(),
            "bills saved"
        );
        self.rows = bills.iter().map(BillDraft::from).collect();
        self.balance = balance;
        self.state = StoreState::Persisted;
        Ok(())
    }

    fn ensure_index(&self, index: usize) -> Result<()> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(BillError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            })
        }
    }

    fn mark_dirty(&mut self) {
        self.state = StoreState::Dirty;
    }
}

fn read_snapshot(storage: &dyn StorageBackend) -> Result<(Vec<BillDraft>, Balance)> {
    let bills = match storage.load_bills()? {
        Some(bills) => bills,
        None => {
            info!(location = %storage.describe(), "no bills document found, writing samples");
            storage.save_bills(&sample_bills())?;
            storage.load_bills()?.unwrap_or_else(sample_bills)
        }
    };
    let balance = storage.load_balance()?.unwrap_or_default();
    debug!(bills = bills.len(), balance = balance.balance, "snapshot loaded");
    Ok((bills.iter().map(BillDraft::from).collect(), balance))
}

fn positive_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(BillError::InvalidInput(format!(
            "amount must be a positive number, got {}",
            amount
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;

    use super::*;
    use crate::core::{time::FixedClock, validation::RowErrorReason};

    #[derive(Default)]
    struct Documents {
        bills: Option<Vec<Bill>>,
        balance: Option<Balance>,
        writes: usize,
        fail_writes: bool,
    }

    #[derive(Clone, Default)]
    struct MemoryStorage {
        docs: Arc<Mutex<Documents>>,
    }

    impl MemoryStorage {
        fn with(bills: Vec<Bill>, balance: f64) -> Self {
            let storage = Self::default();
            {
                let mut docs = storage.docs.lock().unwrap();
                docs.bills = Some(bills);
                docs.balance = Some(Balance::new(balance));
            }
            storage
        }
    }

    impl StorageBackend for MemoryStorage {
        fn load_bills(&self) -> Result<Option<Vec<Bill>>> {
            Ok(self.docs.lock().unwrap().bills.clone())
        }

        fn save_bills(&self, bills: &[Bill]) -> Result<()> {
            let mut docs = self.docs.lock().unwrap();
            if docs.fail_writes {
                return Err(BillError::StorageError("disk full".into()));
            }
            docs.bills = Some(bills.to_vec());
            docs.writes += 1;
            Ok(())
        }

        fn load_balance(&self) -> Result<Option<Balance>> {
            Ok(self.docs.lock().unwrap().balance)
        }

        fn save_balance(&self, balance: &Balance) -> Result<()> {
            let mut docs = self.docs.lock().unwrap();
            docs.balance = Some(*balance);
            docs.writes += 1;
            Ok(())
        }

        fn describe(&self) -> String {
            "memory".into()
        }
    }

    fn march_31_2025() -> RolloverEngine {
        RolloverEngine::new(FixedClock::on(
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        ))
    }

    #[test]
    fn load_bootstraps_samples_and_default_balance() {
        let storage = MemoryStorage::default();
        let store = BillStore::load(Box::new(storage.clone())).unwrap();

        assert_eq!(store.len(), 6);
        assert_eq!(store.balance(), Balance::default());
        assert_eq!(store.state(), StoreState::Loaded);
        assert_eq!(storage.docs.lock().unwrap().bills, Some(sample_bills()));
        assert!(storage.docs.lock().unwrap().balance.is_none());
    }

    #[test]
    fn delete_shifts_later_rows() {
        let storage = MemoryStorage::with(
            vec![
                Bill::new("a", "04/01", 1.0),
                Bill::new("b", "04/02", 2.0),
                Bill::new("c", "04/03", 3.0),
            ],
            0.0,
        );
        let mut store = BillStore::load(Box::new(storage)).unwrap();

        let removed = store.delete_bill(1).unwrap();

        assert_eq!(removed.name, "b");
        assert_eq!(store.bill(1).unwrap().name, "c");
        assert!(store.is_dirty());
    }

    #[test]
    fn delete_out_of_range_is_an_error() {
        let mut store = BillStore::load(Box::new(MemoryStorage::with(vec![], 0.0))).unwrap();
        let err = store.delete_bill(0).unwrap_err();
        assert!(matches!(err, BillError::IndexOutOfRange { index: 0, len: 0 }));
        assert_eq!(store.state(), StoreState::Loaded);
    }

    #[test]
    fn adjust_balance_is_linear() {
        let mut one = BillStore::load(Box::new(MemoryStorage::with(vec![], 10.0))).unwrap();
        let mut two = BillStore::load(Box::new(MemoryStorage::with(vec![], 10.0))).unwrap();

        one.adjust_balance(25.5);
        one.adjust_balance(-40.25);
        two.adjust_balance(25.5 + -40.25);

        assert_eq!(one.balance(), two.balance());
        assert!(one.balance().balance < 0.0);
    }

    #[test]
    fn funds_require_positive_amounts() {
        let mut store = BillStore::load(Box::new(MemoryStorage::with(vec![], 0.0))).unwrap();
        store.add_funds(20.0).unwrap();
        store.subtract_funds(5.0).unwrap();
        assert_eq!(store.balance().balance, 15.0);

        assert!(matches!(
            store.add_funds(0.0),
            Err(BillError::InvalidInput(_))
        ));
        assert!(store.subtract_funds(-1.0).is_err());
        assert!(store.add_funds(f64::NAN).is_err());
        assert_eq!(store.balance().balance, 15.0);
    }

    #[test]
    fn totals_follow_edits() {
        let storage = MemoryStorage::with(vec![Bill::new("kia", "04/12", 472.42)], 500.0);
        let mut store = BillStore::load(Box::new(storage)).unwrap();

        assert_eq!(store.toggle_paid(0).unwrap(), true);
        let totals = store.compute_totals();
        assert_eq!(totals.unpaid_total, 0.0);
        assert!((totals.remaining_balance - 27.58).abs() < 1e-9);

        store
            .update_bill(0, BillEdit::Amount("oops".into()))
            .unwrap();
        let totals = store.compute_totals();
        assert_eq!(totals.remaining_balance, 500.0);
    }

    #[test]
    fn persist_rejects_invalid_rows_without_writing() {
        let storage = MemoryStorage::with(vec![Bill::new("ok", "04/01", 1.0)], 0.0);
        let mut store = BillStore::load(Box::new(storage.clone())).unwrap();
        store.add_blank_bill();
        store.adjust_balance(50.0);

        let err = store.persist().unwrap_err();

        let rows = err.row_errors().expect("validation error");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].reason, RowErrorReason::InvalidDateFormat);
        assert_eq!(storage.docs.lock().unwrap().writes, 0);
        assert!(store.is_dirty());
    }

    #[test]
    fn persist_writes_normalised_rows() {
        let storage = MemoryStorage::with(vec![], 0.0);
        let mut store = BillStore::load(Box::new(storage.clone())).unwrap();
        let index = store.add_blank_bill();
        store
            .update_bill(index, BillEdit::Name(" gym ".into()))
            .unwrap();
        store
            .update_bill(index, BillEdit::DueDate("05/01".into()))
            .unwrap();
        store
            .update_bill(index, BillEdit::Amount("12.5".into()))
            .unwrap();
        store.adjust_balance(100.0);

        store.persist().unwrap();

        let docs = storage.docs.lock().unwrap();
        assert_eq!(docs.bills, Some(vec![Bill::new("gym", "05/01", 12.5)]));
        assert_eq!(docs.balance, Some(Balance::new(100.0)));
        assert_eq!(store.bill(0).unwrap().amount, "12.50");
        assert_eq!(store.state(), StoreState::Persisted);
    }

    #[test]
    fn extra_precision_is_rounded_to_cents_by_the_next_save() {
        let storage = MemoryStorage::with(vec![], 0.0);
        let mut store = BillStore::load(Box::new(storage.clone())).unwrap();
        store.add_bill(BillDraft::new("water", "04/09", "12.3456"));

        store.persist().unwrap();
        assert_eq!(
            storage.docs.lock().unwrap().bills,
            Some(vec![Bill::new("water", "04/09", 12.3456)])
        );
        assert_eq!(store.bill(0).unwrap().amount, "12.35");

        store.persist().unwrap();
        assert_eq!(
            storage.docs.lock().unwrap().bills,
            Some(vec![Bill::new("water", "04/09", 12.35)])
        );
    }

    #[test]
    fn persist_surfaces_storage_failures() {
        let storage = MemoryStorage::with(vec![Bill::new("a", "04/01", 1.0)], 0.0);
        let mut store = BillStore::load(Box::new(storage.clone())).unwrap();
        store.toggle_paid(0).unwrap();
        storage.docs.lock().unwrap().fail_writes = true;

        let err = store.persist().unwrap_err();

        assert!(matches!(err, BillError::StorageError(_)));
        assert!(store.is_dirty());
    }

    #[test]
    fn rollover_advances_resets_and_saves() {
        let storage = MemoryStorage::with(
            vec![Bill::new("rent", "03/31", 50.0).with_paid(true)],
            100.0,
        );
        let mut store =
            BillStore::load_with_rollover(Box::new(storage.clone()), march_31_2025()).unwrap();

        store.rollover().unwrap();

        let expected = vec![Bill::new("rent", "04/30", 50.0)];
        let docs = storage.docs.lock().unwrap();
        assert_eq!(docs.bills, Some(expected));
        assert_eq!(docs.balance, Some(Balance::new(0.0)));
        assert_eq!(store.bill(0).unwrap().due_date, "04/30");
        assert!(!store.bill(0).unwrap().paid);
        assert_eq!(store.balance().balance, 0.0);
    }

    #[test]
    fn failed_rollover_leaves_memory_and_disk_untouched() {
        let storage = MemoryStorage::with(
            vec![Bill::new("rent", "03/31", 50.0).with_paid(true)],
            100.0,
        );
        let mut store =
            BillStore::load_with_rollover(Box::new(storage.clone()), march_31_2025()).unwrap();
        store
            .update_bill(0, BillEdit::Amount("fifty".into()))
            .unwrap();

        let err = store.rollover().unwrap_err();

        assert_eq!(err.row_errors().map(|rows| rows.len()), Some(1));
        assert_eq!(store.bill(0).unwrap().due_date, "03/31");
        assert!(store.bill(0).unwrap().paid);
        assert_eq!(store.balance().balance, 100.0);
        assert_eq!(storage.docs.lock().unwrap().writes, 0);
    }

    #[test]
    fn reload_discards_unsaved_edits() {
        let storage = MemoryStorage::with(vec![Bill::new("a", "04/01", 1.0)], 3.0);
        let mut store = BillStore::load(Box::new(storage)).unwrap();
        store.add_blank_bill();
        store.adjust_balance(10.0);

        store.reload().unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.balance().balance, 3.0);
        assert_eq!(store.state(), StoreState::Loaded);
    }
}
