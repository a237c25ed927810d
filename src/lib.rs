#![doc(test(attr(deny(warnings))))]

//! Finance Tracker records income and expense transactions in a CSV ledger
//! and derives dashboard views from it: totals, spending by category,
//! month-by-month comparisons and a naive savings forecast.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Finance Tracker tracing initialized.");
    });
}
