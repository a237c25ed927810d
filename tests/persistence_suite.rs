use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use finance_tracker::{
    core::services::{Aggregate, SummaryService, TransactionService},
    domain::{Category, Ledger, Transaction, TransactionType},
    errors::LedgerError,
    storage::{CsvLedgerStore, LedgerStore},
};
use tempfile::tempdir;

fn txn(month: u32, day: u32, category: Category, kind: TransactionType, amount: f64) -> Transaction {
    Transaction::new(
        NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
        category,
        kind,
        amount,
    )
    .unwrap()
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn failed_write_preserves_original_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("finances.csv");
    let store = CsvLedgerStore::new(&path);

    let ledger = store
        .append(
            &Ledger::new(),
            txn(1, 5, Category::Food, TransactionType::Expense, 50.0),
        )
        .expect("initial append");
    let original = fs::read_to_string(&path).unwrap();

    // A directory squatting on the staging path makes the write fail.
    fs::create_dir_all(tmp_path_for(&path)).unwrap();

    let result = store.append(
        &ledger,
        txn(1, 6, Category::Transport, TransactionType::Expense, 12.5),
    );
    assert!(matches!(result, Err(LedgerError::Storage(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert_eq!(ledger.len(), 1);
}

#[test]
fn ledger_survives_a_reopen() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("nested").join("data").join("finances.csv");

    let store = CsvLedgerStore::new(&path);
    let mut ledger = store.load().unwrap();
    assert!(ledger.is_empty());
    for (month, kind, amount) in [
        (1, TransactionType::Income, 2000.0),
        (1, TransactionType::Expense, 50.0),
        (2, TransactionType::Income, 2000.0),
        (2, TransactionType::Expense, 1000.0),
    ] {
        let category = match kind {
            TransactionType::Income => Category::Salary,
            TransactionType::Expense => Category::Rent,
        };
        ledger = TransactionService::add(&store, &ledger, txn(month, 10, category, kind, amount))
            .unwrap();
    }

    let reopened = CsvLedgerStore::new(&path).load().unwrap();
    assert_eq!(reopened, ledger);
    assert_eq!(
        SummaryService::predicted_monthly_savings(&reopened),
        Aggregate::Ready(1475.0)
    );
}

#[test]
fn externally_written_file_is_readable() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("finances.csv");
    fs::write(
        &path,
        "Date,Category,Type,Amount\n\
         2024-01-05 00:00:00,Food,Expense,50\n\
         2024-01-10 00:00:00,Salary,Income,2000.0\n",
    )
    .unwrap();

    let ledger = CsvLedgerStore::new(&path).load().unwrap();
    let totals = SummaryService::totals_by_type(&ledger).into_ready().unwrap();
    assert_eq!(totals.income, 2000.0);
    assert_eq!(totals.expense, 50.0);
    assert_eq!(totals.net_savings(), 1950.0);

    // Rewriting normalises the dates.
    CsvLedgerStore::new(&path).persist(&ledger).unwrap();
    let rewritten = fs::read_to_string(&path).unwrap();
    assert!(rewritten.contains("2024-01-05,Food,Expense,50.0"));
    assert!(!rewritten.contains("00:00:00"));
}
