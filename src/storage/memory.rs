use std::sync::RwLock;

use crate::{
    domain::Ledger,
    errors::{LedgerError, Result},
};

use super::LedgerStore;

/// Keeps the ledger in process memory. Used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    ledger: RwLock<Option<Ledger>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: RwLock::new(Some(ledger)),
        }
    }

    /// Number of records currently stored, `None` if nothing was ever persisted.
    pub fn stored_len(&self) -> Option<usize> {
        self.ledger
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(Ledger::len))
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn load(&self) -> Result<Ledger> {
        let guard = self
            .ledger
            .read()
            .map_err(|_| LedgerError::Storage("in-memory ledger lock poisoned".into()))?;
        Ok(guard.clone().unwrap_or_default())
    }

    fn persist(&self, ledger: &Ledger) -> Result<()> {
        let mut guard = self
            .ledger
            .write()
            .map_err(|_| LedgerError::Storage("in-memory ledger lock poisoned".into()))?;
        *guard = Some(ledger.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
