#![doc(test(attr(deny(warnings))))]

//! Budget Ledger records personal income and expense transactions in a
//! durable JSON file and derives totals, balance, spend ratio and history
//! views from them.
//!
//! Presentation layers talk to [`ReportService`]; the `budget_ledger_cli`
//! binary is one such layer.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{RecordStore, ReportService};
pub use errors::LedgerError;
pub use ledger::{HistoryEntry, HistoryQuery, Record, RecordKind, SpendRatio, Totals};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Budget Ledger tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
