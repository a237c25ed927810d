//! Business logic helpers for recording transactions.

use crate::domain::{Ledger, Transaction};
use crate::errors::Result;
use crate::storage::LedgerStore;

/// Validates and records new ledger transactions through a store.
pub struct TransactionService;

impl TransactionService {
    /// Appends `transaction` and persists the result, returning the grown ledger.
    ///
    /// Invalid input is rejected before anything is written; `ledger` is never modified.
    pub fn add(
        store: &dyn LedgerStore,
        ledger: &Ledger,
        transaction: Transaction,
    ) -> Result<Ledger> {
        if let Err(err) = transaction.validate() {
            tracing::warn!(error = %err, "rejected transaction");
            return Err(err);
        }
        let updated = store.append(ledger, transaction)?;
        tracing::info!(transactions = updated.len(), "transaction recorded");
        Ok(updated)
    }

    /// Parses text fields (as typed on the command line) and appends the result.
    pub fn add_from_fields(
        store: &dyn LedgerStore,
        ledger: &Ledger,
        date: &str,
        category: &str,
        kind: &str,
        amount: &str,
    ) -> Result<Ledger> {
        let transaction = Transaction::parse(date, category, kind, amount).map_err(|err| {
            tracing::warn!(error = %err, "rejected transaction input");
            err
        })?;
        Self::add(store, ledger, transaction)
    }
}
