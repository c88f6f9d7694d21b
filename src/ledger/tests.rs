#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use rust_decimal_macros::dec;

use super::*;
use crate::error::ValidationError;
use crate::models::TransactionKind;
use crate::store::{BlobStore, MemoryBlobStore, LAST_ID_KEY, TRANSACTIONS_KEY};

fn empty_ledger() -> (Ledger, MemoryBlobStore) {
    let handle = MemoryBlobStore::new();
    let ledger = Ledger::initialize(TransactionStore::new(handle.clone())).unwrap();
    (ledger, handle)
}

fn salary() -> NewTransaction {
    NewTransaction::new("Salary", "1000", "2024-01-05", "Work", "income")
}

fn rent() -> NewTransaction {
    NewTransaction::new("Rent", "400", "2024-01-01", "Housing", "expense")
}

/// Reads fine, refuses every write.
struct ReadOnlyStore;

impl BlobStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    fn put(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("store is read-only")
    }
}

// ── initialize ────────────────────────────────────────────────

#[test]
fn test_initialize_empty_store() {
    let (ledger, _) = empty_ledger();
    assert!(ledger.list().is_empty());
    assert!(!ledger.recovered_from_corruption());
}

#[test]
fn test_initialize_from_corrupt_store() {
    let handle = MemoryBlobStore::with_blob(TRANSACTIONS_KEY, "garbage");
    let ledger = Ledger::initialize(TransactionStore::new(handle)).unwrap();
    assert!(ledger.list().is_empty());
    assert!(ledger.recovered_from_corruption());
}

// ── add ───────────────────────────────────────────────────────

#[test]
fn test_add_preserves_fields_and_grows_by_one() {
    let (mut ledger, _) = empty_ledger();
    let before = ledger.list().len();

    let txn = ledger.add(&salary()).unwrap();

    assert_eq!(ledger.list().len(), before + 1);
    let stored = ledger.get(txn.id).unwrap();
    assert_eq!(stored.description, "Salary");
    assert_eq!(stored.amount, dec!(1000));
    assert_eq!(stored.date.to_string(), "2024-01-05");
    assert_eq!(stored.category, "Work");
    assert_eq!(stored.kind, TransactionKind::Income);
}

#[test]
fn test_add_assigns_unique_increasing_ids() {
    let (mut ledger, _) = empty_ledger();
    let mut seen = HashSet::new();
    let mut last = 0;
    for _ in 0..50 {
        let txn = ledger.add(&rent()).unwrap();
        assert!(seen.insert(txn.id), "duplicate id {}", txn.id);
        assert!(txn.id > last);
        last = txn.id;
    }
}

#[test]
fn test_add_invalid_does_not_mutate() {
    let (mut ledger, handle) = empty_ledger();
    ledger.add(&salary()).unwrap();
    let blob_before = handle.get(TRANSACTIONS_KEY).unwrap();

    let mut bad = rent();
    bad.amount = "0".into();
    let err = ledger.add(&bad).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Invalid(ValidationError::NonPositiveAmount)
    ));

    let mut bad = rent();
    bad.category.clear();
    assert!(matches!(
        ledger.add(&bad),
        Err(LedgerError::Invalid(ValidationError::MissingField("category")))
    ));

    assert_eq!(ledger.list().len(), 1);
    assert_eq!(handle.get(TRANSACTIONS_KEY).unwrap(), blob_before);
}

#[test]
fn test_add_persists_immediately() {
    let (mut ledger, handle) = empty_ledger();
    let txn = ledger.add(&salary()).unwrap();

    let reopened = Ledger::initialize(TransactionStore::new(handle)).unwrap();
    assert_eq!(reopened.list(), &[txn]);
}

#[test]
fn test_add_rolls_back_when_save_fails() {
    let mut ledger = Ledger::initialize(TransactionStore::new(ReadOnlyStore)).unwrap();
    let err = ledger.add(&salary()).unwrap_err();
    assert!(matches!(err, LedgerError::Storage(_)));
    assert!(ledger.list().is_empty());
}

#[test]
fn test_ids_continue_after_reload() {
    let (mut ledger, handle) = empty_ledger();
    let first = ledger.add(&salary()).unwrap();

    let mut reopened = Ledger::initialize(TransactionStore::new(handle)).unwrap();
    let second = reopened.add(&rent()).unwrap();
    assert!(second.id > first.id);
}

#[test]
fn test_removed_newest_id_is_never_reissued() {
    let (mut ledger, _) = empty_ledger();
    // A burst pushes ids ahead of the clock
    let mut newest = 0;
    for _ in 0..200 {
        newest = ledger.add(&rent()).unwrap().id;
    }

    assert!(ledger.remove(newest).unwrap());
    let fresh = ledger.add(&rent()).unwrap();
    assert!(fresh.id > newest, "id {} reissued", fresh.id);
}

#[test]
fn test_removed_newest_id_is_never_reissued_after_reload() {
    let (mut ledger, handle) = empty_ledger();
    let mut newest = 0;
    for _ in 0..200 {
        newest = ledger.add(&rent()).unwrap().id;
    }
    assert!(ledger.remove(newest).unwrap());
    assert_eq!(
        handle.get(LAST_ID_KEY).unwrap(),
        Some(newest.to_string())
    );

    let mut reopened = Ledger::initialize(TransactionStore::new(handle)).unwrap();
    let fresh = reopened.add(&salary()).unwrap();
    assert!(fresh.id > newest, "id {} reissued", fresh.id);
}

#[test]
fn test_id_mark_never_below_loaded_ids() {
    // Stores written before the mark existed only carry the transactions
    let far_future = 9_000_000_000_000_i64;
    let raw = format!(
        r#"[{{"id":{far_future},"description":"Old","amount":"5","date":"2024-01-01","category":"Misc","type":"expense"}}]"#
    );
    let handle = MemoryBlobStore::with_blob(TRANSACTIONS_KEY, &raw);
    let mut ledger = Ledger::initialize(TransactionStore::new(handle)).unwrap();

    let fresh = ledger.add(&rent()).unwrap();
    assert_eq!(fresh.id, far_future + 1);
}

#[test]
fn test_max_amounts_keep_summary_usable() {
    let (mut ledger, _) = empty_ledger();
    let mut big = rent();
    big.amount = "1000000000000".into();
    ledger.add(&big).unwrap();
    ledger.add(&big).unwrap();

    let mut too_big = rent();
    too_big.amount = "79228162514264337593543950335".into();
    assert!(matches!(
        ledger.add(&too_big),
        Err(LedgerError::Invalid(ValidationError::AmountTooLarge))
    ));

    assert_eq!(
        crate::query::summarize(ledger.list()).expenses,
        dec!(2000000000000)
    );
}

// ── remove ────────────────────────────────────────────────────

#[test]
fn test_remove_existing() {
    let (mut ledger, handle) = empty_ledger();
    let keep = ledger.add(&salary()).unwrap();
    let gone = ledger.add(&rent()).unwrap();

    assert!(ledger.remove(gone.id).unwrap());
    assert!(ledger.get(gone.id).is_none());
    assert_eq!(ledger.list(), &[keep.clone()]);

    let reopened = Ledger::initialize(TransactionStore::new(handle)).unwrap();
    assert_eq!(reopened.list(), &[keep]);
}

#[test]
fn test_remove_unknown_is_noop() {
    let (mut ledger, handle) = empty_ledger();
    ledger.add(&salary()).unwrap();
    let before = ledger.list().to_vec();
    let blob_before = handle.get(TRANSACTIONS_KEY).unwrap();

    assert!(!ledger.remove(12345).unwrap());
    assert_eq!(ledger.list(), before.as_slice());
    assert_eq!(handle.get(TRANSACTIONS_KEY).unwrap(), blob_before);
}

#[test]
fn test_remove_twice() {
    let (mut ledger, _) = empty_ledger();
    let txn = ledger.add(&salary()).unwrap();
    assert!(ledger.remove(txn.id).unwrap());
    assert!(!ledger.remove(txn.id).unwrap());
}

// ── list ──────────────────────────────────────────────────────

#[test]
fn test_list_is_insertion_order() {
    let (mut ledger, _) = empty_ledger();
    let a = ledger.add(&rent()).unwrap();
    let b = ledger.add(&salary()).unwrap();
    let listed: Vec<i64> = ledger.list().iter().map(|t| t.id).collect();
    assert_eq!(listed, vec![a.id, b.id]);
}
