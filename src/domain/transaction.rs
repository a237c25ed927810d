//! Domain model for a single income or expense record.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{category::Category, common::Displayable};
use crate::errors::{LedgerError, Result};

/// Direction of money flow for a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(LedgerError::InvalidInput(format!(
                "unknown transaction type `{}` (expected Income or Expense)",
                trimmed
            ))),
        }
    }
}

/// A dated amount of money attributed to a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub category: Category,
    pub kind: TransactionType,
    pub amount: f64,
}

impl Transaction {
    /// Builds a transaction, rejecting negative or non-finite amounts.
    pub fn new(
        date: NaiveDate,
        category: Category,
        kind: TransactionType,
        amount: f64,
    ) -> Result<Self> {
        let txn = Self {
            date,
            category,
            kind,
            amount,
        };
        txn.validate()?;
        Ok(txn)
    }

    /// Parses the four user-facing fields of a transaction from text.
    pub fn parse(date: &str, category: &str, kind: &str, amount: &str) -> Result<Self> {
        let date = parse_date(date)?;
        let category = category.parse::<Category>()?;
        let kind = kind.parse::<TransactionType>()?;
        let amount = amount.trim().parse::<f64>().map_err(|_| {
            LedgerError::InvalidInput(format!("amount `{}` is not a number", amount.trim()))
        })?;
        Self::new(date, category, kind, amount)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() {
            return Err(LedgerError::InvalidInput(format!(
                "amount `{}` must be a finite number",
                self.amount
            )));
        }
        if self.amount < 0.0 {
            return Err(LedgerError::InvalidInput(format!(
                "amount `{}` must not be negative",
                self.amount
            )));
        }
        Ok(())
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} {} {} {:.2}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.kind,
            self.amount
        )
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time of day which is discarded.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                .map(|stamp| stamp.date())
        })
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
                .map(|stamp| stamp.date())
        })
        .map_err(|_| {
            LedgerError::InvalidInput(format!(
                "date `{}` is not a calendar date (expected YYYY-MM-DD)",
                trimmed
            ))
        })
}
