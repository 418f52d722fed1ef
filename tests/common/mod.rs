#![allow(dead_code)]

use std::path::{Path, PathBuf};

use budget_ledger::{RecordKind, ReportService};
use tempfile::TempDir;

/// Isolated ledger file; the directory lives as long as the returned guard.
pub fn temp_ledger() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("data").join("transactions.json");
    (temp, path)
}

pub fn open_service(path: &Path) -> ReportService {
    ReportService::open_path(path).expect("open report service")
}

/// The two-entry scenario: salary on Jan 1st, groceries on Jan 2nd.
pub fn record_scenario(service: &ReportService) {
    service
        .record_transaction(RecordKind::Income, "5000", "Maosh", "Salary", "2024-01-01")
        .expect("record income");
    service
        .record_transaction(RecordKind::Expense, "1200", "Ovqat", "Food", "2024-01-02")
        .expect("record expense");
}

/// `transactions.json` -> `transactions.json.tmp`.
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().expect("file name").to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
