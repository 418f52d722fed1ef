//! Append-only record collection kept in lockstep with its durable medium.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::{
    errors::LedgerError,
    ledger::Record,
    storage::{JsonFileBackend, LoadError, LoadedRecords, RecordBackend},
};

/// In-memory record sequence mirrored to a [`RecordBackend`].
///
/// Every successful [`append`](RecordStore::append) has already been
/// persisted when it returns; a failed one leaves both views untouched.
pub struct RecordStore {
    records: Vec<Record>,
    backend: Box<dyn RecordBackend>,
    recovered_from: Option<PathBuf>,
}

impl RecordStore {
    /// Loads the persisted sequence. If the file is unreadable, or some of
    /// its entries are, its bytes are copied aside and the store keeps only
    /// the records that could be read.
    pub fn open(backend: Box<dyn RecordBackend>) -> Result<Self, LedgerError> {
        let (records, complete) = match read_or_recover(backend.as_ref())? {
            Some(loaded) => {
                let complete = loaded.is_complete();
                (loaded.records, complete)
            }
            None => (Vec::new(), false),
        };

        let mut recovered_from = None;
        if !complete {
            match backend.quarantine() {
                Ok(copy) => recovered_from = copy,
                Err(err) => error!(
                    path = %backend.location().display(),
                    error = %err,
                    "could not preserve unreadable record file"
                ),
            }
        }
        info!(
            path = %backend.location().display(),
            count = records.len(),
            "record store opened"
        );
        Ok(Self {
            records,
            backend,
            recovered_from,
        })
    }

    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        Self::open(Box::new(JsonFileBackend::new(path)))
    }

    /// Reads the persisted sequence without touching in-memory state.
    pub fn load(&self) -> Result<Vec<Record>, LedgerError> {
        Ok(read_or_recover(self.backend.as_ref())?
            .map(|loaded| loaded.records)
            .unwrap_or_default())
    }

    pub fn append(&mut self, record: Record) -> Result<(), LedgerError> {
        self.records.push(record);
        if let Err(err) = self.persist() {
            self.records.pop();
            error!(
                path = %self.backend.location().display(),
                error = %err,
                "persist failed; append rolled back"
            );
            return Err(err);
        }
        debug!(count = self.records.len(), "record appended");
        Ok(())
    }

    /// Rewrites the whole sequence to the backend.
    pub fn persist(&self) -> Result<(), LedgerError> {
        self.backend.write(&self.records)
    }

    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        self.backend.location()
    }

    /// Where unreadable content found at open time was copied, if anywhere.
    pub fn recovered_from(&self) -> Option<&Path> {
        self.recovered_from.as_deref()
    }
}

/// `Ok(None)` marks corrupted content; only real I/O failures are errors.
fn read_or_recover(backend: &dyn RecordBackend) -> Result<Option<LoadedRecords>, LedgerError> {
    match backend.read() {
        Ok(loaded) => {
            if !loaded.is_complete() {
                warn!(
                    path = %backend.location().display(),
                    skipped = loaded.skipped,
                    kept = loaded.records.len(),
                    "some persisted records are unreadable and were left out"
                );
            }
            Ok(Some(loaded))
        }
        Err(LoadError::Corrupted(err)) => {
            warn!(
                path = %backend.location().display(),
                error = %err,
                "persisted records are unreadable; treating ledger as empty"
            );
            Ok(None)
        }
        Err(LoadError::Io(err)) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::utils::tmp_path, ledger::RecordKind};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn store_in(temp: &TempDir) -> RecordStore {
        RecordStore::open_path(temp.path().join("transactions.json")).expect("open store")
    }

    fn income(amount: &str) -> Record {
        Record::parse(RecordKind::Income, amount, "", "Salary", "2024-01-01").unwrap()
    }

    #[test]
    fn fresh_store_is_empty() {
        let temp = tempdir().unwrap();
        let store = store_in(&temp);
        assert!(store.is_empty());
        assert!(store.recovered_from().is_none());
    }

    #[test]
    fn append_persists_before_returning() {
        let temp = tempdir().unwrap();
        let mut store = store_in(&temp);
        store.append(income("10")).unwrap();
        store.append(income("20")).unwrap();

        assert_eq!(store.load().unwrap(), store.all());
    }

    #[test]
    fn corrupted_file_opens_empty_and_is_preserved() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("transactions.json");
        fs::write(&path, "[{\"type\": \"income\", \"amount\": ").unwrap();

        let store = RecordStore::open_path(&path).expect("corruption is not fatal");
        assert!(store.is_empty());
        let copy = store.recovered_from().expect("quarantine copy");
        assert!(fs::read_to_string(copy).unwrap().starts_with("[{"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn unreadable_entries_do_not_cost_the_rest() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("transactions.json");
        let raw = r#"[
    {"type": "income", "amount": 5000, "note": "", "category": "Salary", "date": "2024-01-01"},
    {"type": "income", "amount": 7.922816251426434e28, "note": "", "category": "Salary", "date": "2024-01-02"}
]"#;
        fs::write(&path, raw).unwrap();

        let mut store = RecordStore::open_path(&path).expect("partial file is not fatal");
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0], income("5000"));
        let copy = store.recovered_from().expect("original bytes preserved").to_path_buf();

        store.append(income("10")).unwrap();
        assert_eq!(fs::read_to_string(copy).unwrap(), raw);
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn failed_persist_rolls_back_the_append() {
        let temp = tempdir().unwrap();
        let mut store = store_in(&temp);
        store.append(income("10")).unwrap();
        let before = store.all().to_vec();

        // A directory at the staging path makes File::create fail.
        let staging = tmp_path(store.path());
        fs::create_dir_all(&staging).unwrap();

        let err = store.append(income("99")).expect_err("persist must fail");
        assert!(matches!(err, LedgerError::Io(_)), "unexpected error: {err:?}");
        assert_eq!(store.all(), before.as_slice());
        assert_eq!(store.load().unwrap(), before);
    }
}
