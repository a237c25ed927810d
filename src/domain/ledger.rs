//! The insertion-ordered transaction ledger and its month grouping key.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{common::Displayable, transaction::Transaction};
use crate::errors::Result;

/// Ordered collection of every recorded transaction.
///
/// Records are only ever appended; every record passed validation on the way in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from existing records, validating each one.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Result<Self> {
        for txn in &transactions {
            txn.validate()?;
        }
        Ok(Self { transactions })
    }

    /// Appends a record after validation. On error the ledger is left untouched.
    pub fn append(&mut self, transaction: Transaction) -> Result<()> {
        transaction.validate()?;
        self.transactions.push(transaction);
        Ok(())
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// A `(year, month)` grouping key derived from a transaction date.
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl From<&Transaction> for MonthKey {
    fn from(txn: &Transaction) -> Self {
        MonthKey::from_date(txn.date)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Displayable for MonthKey {
    fn display_label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|first| first.format("%b %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, TransactionType};

    fn txn(amount: f64) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            category: Category::Food,
            kind: TransactionType::Expense,
            amount,
        }
    }

    #[test]
    fn append_rejects_invalid_record_and_keeps_ledger() {
        let mut ledger = Ledger::new();
        ledger.append(txn(12.5)).unwrap();
        assert!(ledger.append(txn(-10.0)).is_err());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.transactions()[0].amount, 12.5);
    }

    #[test]
    fn from_transactions_validates_every_record() {
        assert!(Ledger::from_transactions(vec![txn(1.0), txn(-1.0)]).is_err());
        assert_eq!(Ledger::from_transactions(vec![txn(1.0), txn(1.0)]).unwrap().len(), 2);
    }

    #[test]
    fn month_keys_order_chronologically() {
        let mut keys = vec![
            MonthKey::new(2024, 2),
            MonthKey::new(2023, 12),
            MonthKey::new(2024, 1),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                MonthKey::new(2023, 12),
                MonthKey::new(2024, 1),
                MonthKey::new(2024, 2)
            ]
        );
        assert_eq!(MonthKey::new(2024, 1).to_string(), "2024-01");
        assert_eq!(MonthKey::new(2024, 1).display_label(), "Jan 2024");
    }
}
