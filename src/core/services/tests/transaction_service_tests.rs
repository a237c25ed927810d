use crate::core::services::{Dashboard, DashboardService, TransactionService};
use crate::domain::{Category, Ledger, TransactionType};
use crate::errors::LedgerError;
use crate::storage::{InMemoryLedgerStore, LedgerStore};

use super::txn;

#[test]
fn add_appends_and_persists() {
    let store = InMemoryLedgerStore::new();
    let ledger = store.load().expect("load");
    let updated = TransactionService::add(
        &store,
        &ledger,
        txn((2024, 1, 5), Category::Food, TransactionType::Expense, 50.0),
    )
    .expect("add transaction");

    assert!(ledger.is_empty());
    assert_eq!(updated.len(), 1);
    assert_eq!(store.stored_len(), Some(1));
    assert_eq!(store.load().unwrap(), updated);
}

#[test]
fn negative_amount_is_rejected_and_nothing_is_written() {
    let store = InMemoryLedgerStore::new();
    let ledger = Ledger::new();
    let mut bad = txn((2024, 1, 5), Category::Food, TransactionType::Expense, 1.0);
    bad.amount = -10.0;

    let err = TransactionService::add(&store, &ledger, bad).expect_err("must reject");
    assert!(matches!(err, LedgerError::InvalidInput(_)));
    assert!(ledger.is_empty());
    assert_eq!(store.stored_len(), None);
}

#[test]
fn add_from_fields_parses_text_input() {
    let store = InMemoryLedgerStore::new();
    let ledger = TransactionService::add_from_fields(
        &store,
        &Ledger::new(),
        "2024-01-10",
        "Salary",
        "Income",
        "2000",
    )
    .expect("add from text");
    let stored = ledger.transactions();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].kind, TransactionType::Income);
}

#[test]
fn add_from_fields_rejects_out_of_enum_values() {
    let store = InMemoryLedgerStore::new();
    let ledger = Ledger::new();
    for (category, kind, amount) in [
        ("Groceries", "Expense", "5"),
        ("Food", "Transfer", "5"),
        ("Food", "Expense", "-10"),
        ("Food", "Expense", "ten"),
    ] {
        let err = TransactionService::add_from_fields(
            &store,
            &ledger,
            "2024-01-10",
            category,
            kind,
            amount,
        )
        .expect_err("invalid input must fail");
        assert!(matches!(err, LedgerError::InvalidInput(_)), "{err:?}");
    }
    assert_eq!(store.stored_len(), None);
}

#[test]
fn add_extends_a_seeded_store() {
    let seeded = Ledger::from_transactions(vec![
        txn((2024, 1, 10), Category::Salary, TransactionType::Income, 2000.0),
        txn((2024, 1, 12), Category::Rent, TransactionType::Expense, 900.0),
    ])
    .unwrap();
    let store = InMemoryLedgerStore::with_ledger(seeded);

    let ledger = store.load().expect("load seeded ledger");
    assert_eq!(ledger.len(), 2);

    let updated = TransactionService::add(
        &store,
        &ledger,
        txn((2024, 1, 15), Category::Food, TransactionType::Expense, 45.5),
    )
    .expect("add transaction");
    assert_eq!(store.stored_len(), Some(3));
    assert_eq!(updated.transactions()[..2], ledger.transactions()[..]);
    let Dashboard::Populated(view) = DashboardService::render(&updated) else {
        panic!("seeded ledger renders a populated dashboard");
    };
    assert_eq!(view.totals.expense, 945.5);
    assert_eq!(view.history[0].category, Category::Food);
}
