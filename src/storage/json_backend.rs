use chrono::Utc;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    core::utils::{sibling_with_suffix, write_atomic},
    errors::LedgerError,
    ledger::Record,
};

use super::{LoadError, LoadedRecords, RecordBackend};

const QUARANTINE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Pretty-printed JSON array on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordBackend for JsonFileBackend {
    fn read(&self) -> Result<LoadedRecords, LoadError> {
        load_records_from_path(&self.path)
    }

    fn write(&self, records: &[Record]) -> Result<(), LedgerError> {
        save_records_to_path(records, &self.path)
    }

    fn location(&self) -> &Path {
        &self.path
    }

    fn quarantine(&self) -> Result<Option<PathBuf>, LedgerError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let stamp = Utc::now().format(QUARANTINE_TIMESTAMP_FORMAT);
        let target = sibling_with_suffix(&self.path, &format!("corrupt-{stamp}"));
        fs::copy(&self.path, &target)?;
        Ok(Some(target))
    }
}

pub fn save_records_to_path(records: &[Record], path: &Path) -> Result<(), LedgerError> {
    let json = serde_json::to_string_pretty(records)?;
    write_atomic(path, &json)?;
    debug!(path = %path.display(), count = records.len(), "records written");
    Ok(())
}

/// Missing and blank files both read as an empty sequence. A file that is
/// not a JSON array is corrupted; array entries that do not form a valid
/// record are skipped one by one.
pub fn load_records_from_path(path: &Path) -> Result<LoadedRecords, LoadError> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(LoadedRecords::default()),
        Err(err) => return Err(err.into()),
    };
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(LoadedRecords::default());
    }

    let entries: Vec<Value> = serde_json::from_slice(&data)?;
    let mut loaded = LoadedRecords::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Record>(entry) {
            Ok(record) => loaded.records.push(record),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    index,
                    error = %err,
                    "skipping unreadable record"
                );
                loaded.skipped += 1;
            }
        }
    }
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::RecordKind;
    use tempfile::TempDir;

    fn backend_with_temp_dir() -> (JsonFileBackend, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let backend = JsonFileBackend::new(temp.path().join("data").join("transactions.json"));
        (backend, temp)
    }

    fn sample_records() -> Vec<Record> {
        vec![
            Record::parse(RecordKind::Income, "5000", "Maosh", "Salary", "2024-01-01").unwrap(),
            Record::parse(RecordKind::Expense, "0.10", "", "Food", "2024-01-02").unwrap(),
        ]
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (backend, _guard) = backend_with_temp_dir();
        assert!(backend.read().expect("read").records.is_empty());
    }

    #[test]
    fn blank_file_reads_as_empty() {
        let (backend, _guard) = backend_with_temp_dir();
        fs::create_dir_all(backend.path().parent().unwrap()).unwrap();
        fs::write(backend.path(), " \n").unwrap();
        let loaded = backend.read().expect("read");
        assert!(loaded.records.is_empty());
        assert!(loaded.is_complete());
    }

    #[test]
    fn write_and_read_roundtrip() {
        let (backend, _guard) = backend_with_temp_dir();
        let records = sample_records();
        backend.write(&records).expect("write records");
        assert_eq!(backend.read().expect("read records"), LoadedRecords::from(records));

        let raw = fs::read_to_string(backend.path()).unwrap();
        assert!(raw.contains("\"type\": \"income\""), "unexpected layout: {raw}");
        assert!(raw.contains("\"amount\": 5000,"), "unexpected layout: {raw}");
        assert!(raw.contains("\"amount\": 0.10,"), "unexpected layout: {raw}");
    }

    #[test]
    fn unreadable_entries_are_skipped_individually() {
        let (backend, _guard) = backend_with_temp_dir();
        fs::create_dir_all(backend.path().parent().unwrap()).unwrap();
        fs::write(
            backend.path(),
            r#"[
                {"type": "income", "amount": 5000, "date": "2024-01-01"},
                {"type": "income", "amount": 79228162514264337593543950335, "date": "2024-01-02"},
                {"type": "gift", "amount": 1, "date": "2024-01-03"},
                {"type": "expense", "amount": 1200.5, "date": "2024-01-04"}
            ]"#,
        )
        .unwrap();

        let loaded = backend.read().expect("partial read");
        assert_eq!(loaded.skipped, 2);
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[1].kind(), RecordKind::Expense);
        assert_eq!(loaded.records[1].amount(), rust_decimal_macros::dec!(1200.5));
    }

    #[test]
    fn garbage_is_reported_as_corruption() {
        let (backend, _guard) = backend_with_temp_dir();
        fs::create_dir_all(backend.path().parent().unwrap()).unwrap();
        fs::write(backend.path(), "{ not json").unwrap();
        assert!(matches!(backend.read(), Err(LoadError::Corrupted(_))));
    }

    #[test]
    fn quarantine_copies_the_file_aside() {
        let (backend, _guard) = backend_with_temp_dir();
        assert!(backend.quarantine().unwrap().is_none());

        fs::create_dir_all(backend.path().parent().unwrap()).unwrap();
        fs::write(backend.path(), "garbage").unwrap();
        let copy = backend.quarantine().unwrap().expect("copy made");
        assert_eq!(fs::read_to_string(copy).unwrap(), "garbage");
    }
}
