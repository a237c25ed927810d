mod dashboard_service_tests;
mod transaction_service_tests;

use chrono::NaiveDate;

use crate::domain::{Category, Ledger, Transaction, TransactionType};

pub(super) fn txn(
    (year, month, day): (i32, u32, u32),
    category: Category,
    kind: TransactionType,
    amount: f64,
) -> Transaction {
    Transaction::new(
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date"),
        category,
        kind,
        amount,
    )
    .expect("valid transaction")
}

pub(super) fn ledger_of(transactions: Vec<Transaction>) -> Ledger {
    Ledger::from_transactions(transactions).expect("valid ledger")
}

/// January saves 1950, February saves 1000.
pub(super) fn two_month_ledger() -> Ledger {
    use Category::*;
    use TransactionType::*;
    ledger_of(vec![
        txn((2024, 1, 5), Food, Expense, 50.0),
        txn((2024, 1, 10), Salary, Income, 2000.0),
        txn((2024, 2, 1), Rent, Expense, 1000.0),
        txn((2024, 2, 10), Salary, Income, 2000.0),
    ])
}
