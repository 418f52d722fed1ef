//! The reporting façade: the only surface presentation layers talk to.

use std::{
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use rust_decimal::Decimal;
use tracing::info;

use crate::{
    config::Config,
    core::store::RecordStore,
    errors::LedgerError,
    ledger::{
        aggregate, history_view, AmountInput, CategoryTotal, DateInput, HistoryEntry,
        HistoryQuery, Record, RecordKind, SpendRatio, Totals,
    },
    storage::RecordBackend,
};

/// Records transactions and answers the balance, spend-ratio and history
/// questions the UI asks. Safe to share across threads.
pub struct ReportService {
    store: RwLock<RecordStore>,
}

impl ReportService {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    pub fn with_backend(backend: Box<dyn RecordBackend>) -> Result<Self, LedgerError> {
        Ok(Self::new(RecordStore::open(backend)?))
    }

    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        Ok(Self::new(RecordStore::open_path(path)?))
    }

    /// Opens the store at the data file named by `config`, resolved against
    /// the application directory `base`.
    pub fn from_config(config: &Config, base: &Path) -> Result<Self, LedgerError> {
        Self::open_path(config.resolve_data_file(base))
    }

    /// Validates the input, appends the record and persists it before
    /// returning. On any failure nothing is stored.
    pub fn record_transaction(
        &self,
        kind: RecordKind,
        amount: impl Into<AmountInput>,
        note: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<DateInput>,
    ) -> Result<Record, LedgerError> {
        let record = Record::parse(kind, amount, note, category, date)?;
        let mut store = self.write();
        store.append(record.clone())?;
        info!(
            kind = %record.kind(),
            amount = %record.amount(),
            category = record.category(),
            date = %record.date(),
            "transaction recorded"
        );
        Ok(record)
    }

    pub fn totals(&self) -> Totals {
        aggregate::totals(self.read().all())
    }

    /// Percentage of income spent; zero when nothing has been earned.
    pub fn spend_ratio(&self) -> Decimal {
        aggregate::spend_ratio_percent(self.read().all())
    }

    pub fn spend_ratio_signal(&self) -> SpendRatio {
        aggregate::spend_ratio(self.read().all())
    }

    /// Every record in insertion order.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history_with(&HistoryQuery::default())
    }

    pub fn history_with(&self, query: &HistoryQuery) -> Vec<HistoryEntry> {
        history_view(self.read().all(), query)
    }

    pub fn category_breakdown(&self, kind: RecordKind) -> Vec<CategoryTotal> {
        aggregate::category_breakdown(self.read().all(), kind)
    }

    pub fn record_count(&self) -> usize {
        self.read().len()
    }

    pub fn data_path(&self) -> PathBuf {
        self.read().path().to_path_buf()
    }

    pub fn recovered_from(&self) -> Option<PathBuf> {
        self.read().recovered_from().map(Path::to_path_buf)
    }

    // The store rolls back before any error escapes, so a poisoned lock
    // still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, RecordStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RecordStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}
