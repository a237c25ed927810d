use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    core::utils::{ensure_dir, tmp_path},
    domain::{Ledger, Transaction},
    errors::{LedgerError, Result},
};

use super::LedgerStore;

pub const CSV_HEADER: [&str; 4] = ["Date", "Category", "Type", "Amount"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One persisted ledger row. Columns are matched by header name on read.
#[derive(Debug, Serialize, Deserialize)]
struct LedgerRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Amount")]
    amount: String,
}

impl LedgerRow {
    fn from_transaction(txn: &Transaction) -> Self {
        Self {
            date: txn.date.format(DATE_FORMAT).to_string(),
            category: txn.category.to_string(),
            kind: txn.kind.to_string(),
            amount: format_amount(txn.amount),
        }
    }

    fn into_transaction(self) -> Result<Transaction> {
        Transaction::parse(&self.date, &self.category, &self.kind, &self.amount)
    }
}

/// Filesystem-backed CSV persistence with a `Date,Category,Type,Amount` header.
#[derive(Debug, Clone)]
pub struct CsvLedgerStore {
    path: PathBuf,
}

impl CsvLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for CsvLedgerStore {
    fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            if let Some(parent) = self.path.parent() {
                ensure_dir(parent)?;
            }
            tracing::debug!(path = %self.path.display(), "no ledger file yet; starting empty");
            return Ok(Ledger::new());
        }
        let ledger = load_ledger_from_path(&self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            transactions = ledger.len(),
            "loaded ledger"
        );
        Ok(ledger)
    }

    fn persist(&self, ledger: &Ledger) -> Result<()> {
        save_ledger_to_path(ledger, &self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            transactions = ledger.len(),
            "persisted ledger"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Writes the full ledger to `path`, staging through a temporary file.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_path(&tmp)?;
        writer.write_record(CSV_HEADER)?;
        for txn in ledger.transactions() {
            writer.serialize(LedgerRow::from_transaction(txn))?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reads a ledger from `path`. Any invalid row fails the whole load.
pub fn load_ledger_from_path(path: &Path) -> Result<Ledger> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut transactions = Vec::new();
    for (idx, row) in reader.deserialize::<LedgerRow>().enumerate() {
        // Line 1 is the header.
        let line = idx + 2;
        let txn = row
            .map_err(LedgerError::from)
            .and_then(LedgerRow::into_transaction)
            .map_err(|err| {
                LedgerError::Storage(format!("{} line {}: {}", path.display(), line, err))
            })?;
        transactions.push(txn);
    }
    Ledger::from_transactions(transactions)
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.1}", amount)
    } else {
        amount.to_string()
    }
}
