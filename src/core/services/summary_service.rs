//! Aggregations over a ledger snapshot: totals, category breakdowns,
//! month buckets and the savings forecast.
//!
//! Every function here is pure. Each returns an [`Aggregate`] so callers can
//! tell a computed zero apart from "nothing to compute".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Category, Ledger, MonthKey, Transaction, TransactionType};

/// Result of an aggregation that may have nothing to report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Aggregate<T> {
    Ready(T),
    /// The ledger, or the subset the aggregation looks at, is empty.
    NoData,
    /// Both transaction types are required but one never occurs.
    InsufficientData { missing: TransactionType },
}

impl<T> Aggregate<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Aggregate::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Aggregate::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Aggregate::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> Aggregate<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Aggregate::Ready(value) => Aggregate::Ready(f(value)),
            Aggregate::NoData => Aggregate::NoData,
            Aggregate::InsufficientData { missing } => Aggregate::InsufficientData { missing },
        }
    }
}

/// Income and expense sums for some set of transactions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct TypeTotals {
    pub income: f64,
    pub expense: f64,
}

impl TypeTotals {
    pub fn record(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionType::Income => self.income += txn.amount,
            TransactionType::Expense => self.expense += txn.amount,
        }
    }

    pub fn get(&self, kind: TransactionType) -> f64 {
        match kind {
            TransactionType::Income => self.income,
            TransactionType::Expense => self.expense,
        }
    }

    /// Income minus expense; negative when spending exceeds earnings.
    pub fn net_savings(&self) -> f64 {
        self.income - self.expense
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: f64,
    /// Percentage of total expense, in `0.0..=100.0`.
    pub share: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTotal {
    pub month: MonthKey,
    pub totals: TypeTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySavings {
    pub month: MonthKey,
    pub totals: TypeTotals,
    pub savings: f64,
}

/// Monthly savings series plus its naive prediction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsForecast {
    pub months: Vec<MonthlySavings>,
    /// Unweighted mean of `months[*].savings`.
    pub predicted: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Sums amounts per transaction type. A type that never occurs sums to zero.
    pub fn totals_by_type(ledger: &Ledger) -> Aggregate<TypeTotals> {
        if ledger.is_empty() {
            return Aggregate::NoData;
        }
        Aggregate::Ready(Self::sum(ledger.transactions()))
    }

    /// Expense totals per category, alphabetical, zero-expense categories omitted.
    pub fn expense_by_category(ledger: &Ledger) -> Aggregate<Vec<CategoryShare>> {
        let mut buckets: BTreeMap<Category, f64> = BTreeMap::new();
        for txn in ledger.transactions().iter().filter(|txn| txn.is_expense()) {
            *buckets.entry(txn.category).or_insert(0.0) += txn.amount;
        }
        buckets.retain(|_, amount| *amount > 0.0);
        if buckets.is_empty() {
            return Aggregate::NoData;
        }

        let total: f64 = buckets.values().sum();
        let mut shares: Vec<CategoryShare> = buckets
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                category,
                amount,
                share: amount / total * 100.0,
            })
            .collect();
        shares.sort_by(|a, b| a.category.as_str().cmp(b.category.as_str()));
        Aggregate::Ready(shares)
    }

    /// One entry per month present in the ledger, oldest first.
    pub fn monthly_totals(ledger: &Ledger) -> Aggregate<Vec<MonthlyTotal>> {
        if ledger.is_empty() {
            return Aggregate::NoData;
        }
        let mut months: BTreeMap<MonthKey, TypeTotals> = BTreeMap::new();
        for txn in ledger.transactions() {
            months.entry(MonthKey::from(txn)).or_default().record(txn);
        }
        Aggregate::Ready(
            months
                .into_iter()
                .map(|(month, totals)| MonthlyTotal { month, totals })
                .collect(),
        )
    }

    /// Income minus expense per month. Needs both types somewhere in the ledger.
    pub fn monthly_savings(ledger: &Ledger) -> Aggregate<Vec<MonthlySavings>> {
        if ledger.is_empty() {
            return Aggregate::NoData;
        }
        if let Some(missing) = Self::missing_type(ledger) {
            return Aggregate::InsufficientData { missing };
        }
        Self::monthly_totals(ledger).map(|months| {
            months
                .into_iter()
                .map(|entry| MonthlySavings {
                    month: entry.month,
                    totals: entry.totals,
                    savings: entry.totals.net_savings(),
                })
                .collect()
        })
    }

    /// Mean monthly savings over the months present in the ledger.
    ///
    /// This is a flat average: months with no transactions are not counted and
    /// there is no trend or seasonality adjustment.
    pub fn predicted_monthly_savings(ledger: &Ledger) -> Aggregate<f64> {
        Self::savings_forecast(ledger).map(|forecast| forecast.predicted)
    }

    pub fn savings_forecast(ledger: &Ledger) -> Aggregate<SavingsForecast> {
        match Self::monthly_savings(ledger) {
            Aggregate::Ready(months) if !months.is_empty() => {
                let predicted =
                    months.iter().map(|entry| entry.savings).sum::<f64>() / months.len() as f64;
                Aggregate::Ready(SavingsForecast { months, predicted })
            }
            Aggregate::Ready(_) | Aggregate::NoData => Aggregate::NoData,
            Aggregate::InsufficientData { missing } => Aggregate::InsufficientData { missing },
        }
    }

    /// Transactions newest first; records sharing a date keep the latest append on top.
    pub fn history(ledger: &Ledger) -> Vec<&Transaction> {
        let mut rows: Vec<&Transaction> = ledger.transactions().iter().rev().collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    fn sum<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> TypeTotals {
        let mut totals = TypeTotals::default();
        for txn in transactions {
            totals.record(txn);
        }
        totals
    }

    fn missing_type(ledger: &Ledger) -> Option<TransactionType> {
        TransactionType::ALL
            .into_iter()
            .find(|kind| !ledger.transactions().iter().any(|txn| txn.kind == *kind))
    }
}
