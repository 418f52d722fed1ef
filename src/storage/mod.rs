pub mod json_backend;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{errors::LedgerError, ledger::Record};

pub use json_backend::JsonFileBackend;

/// Why persisted records could not be read.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read persisted records: {0}")]
    Io(#[from] std::io::Error),
    #[error("persisted records are corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
}

/// Result of reading the persisted sequence.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    /// Entries that were present but could not be turned into records.
    pub skipped: usize,
}

impl LoadedRecords {
    pub fn is_complete(&self) -> bool {
        self.skipped == 0
    }
}

impl From<Vec<Record>> for LoadedRecords {
    fn from(records: Vec<Record>) -> Self {
        Self {
            records,
            skipped: 0,
        }
    }
}

/// Abstraction over the durable medium holding the record sequence.
pub trait RecordBackend: Send + Sync {
    /// Reads the full sequence. A medium that does not exist yet is empty.
    /// Individual unreadable entries are counted in `skipped` rather than
    /// failing the whole read.
    fn read(&self) -> Result<LoadedRecords, LoadError>;

    /// Replaces the persisted sequence with `records`.
    fn write(&self, records: &[Record]) -> Result<(), LedgerError>;

    /// Human-readable location of the medium.
    fn location(&self) -> &Path;

    /// Copies unreadable persisted state aside so a later write cannot
    /// destroy it. Returns where the copy went, if one was made.
    fn quarantine(&self) -> Result<Option<PathBuf>, LedgerError> {
        Ok(None)
    }
}
