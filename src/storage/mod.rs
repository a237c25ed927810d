pub mod csv_backend;
pub mod memory;

use crate::{
    domain::{Ledger, Transaction},
    errors::Result,
};

/// Abstraction over durable storage for the transaction ledger.
pub trait LedgerStore: Send + Sync {
    /// Returns the persisted ledger, or an empty one when nothing has been stored yet.
    fn load(&self) -> Result<Ledger>;

    /// Replaces the stored ledger with `ledger`.
    fn persist(&self, ledger: &Ledger) -> Result<()>;

    /// Human-readable location used in status output.
    fn describe(&self) -> String;

    /// Returns `ledger` with `transaction` appended, persisting it before returning.
    ///
    /// Validation happens before any write, so a rejected record leaves both the
    /// caller's ledger and the stored copy unchanged.
    fn append(&self, ledger: &Ledger, transaction: Transaction) -> Result<Ledger> {
        let mut updated = ledger.clone();
        updated.append(transaction)?;
        self.persist(&updated)?;
        Ok(updated)
    }
}

pub use csv_backend::{CsvLedgerStore, CSV_HEADER};
pub use memory::InMemoryLedgerStore;
