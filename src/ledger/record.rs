use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::{self, AmountInput};
use crate::errors::LedgerError;

/// Calendar date layout used for input and persistence.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const INCOME_CATEGORIES: &[&str] = &["Salary", "Bonus", "Other"];
const EXPENSE_CATEGORIES: &[&str] = &["Food", "Transport", "Entertainment", "Other"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Income, RecordKind::Expense];

    /// Persisted identifier (`income` / `expense`).
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
        }
    }

    /// Human-readable label for history views.
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Income => "Income",
            RecordKind::Expense => "Expense",
        }
    }

    /// Suggested categories offered by entry forms. Not enforced by the store.
    pub fn default_categories(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Income => INCOME_CATEGORIES,
            RecordKind::Expense => EXPENSE_CATEGORIES,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(RecordKind::Income),
            "expense" => Ok(RecordKind::Expense),
            other => Err(LedgerError::validation(format!(
                "unknown record kind `{other}` (use income or expense)"
            ))),
        }
    }
}

/// Date as handed over by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Date(NaiveDate),
    Text(String),
    Missing,
}

impl DateInput {
    pub fn resolve(self) -> Result<NaiveDate, LedgerError> {
        match self {
            DateInput::Date(date) => Ok(date),
            DateInput::Text(text) => parse_date(&text),
            DateInput::Missing => Err(LedgerError::validation("date is required")),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<Option<NaiveDate>> for DateInput {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map(DateInput::Date).unwrap_or(DateInput::Missing)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

pub fn parse_date(input: &str) -> Result<NaiveDate, LedgerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation("date is required"));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        LedgerError::validation(format!("invalid date `{trimmed}` (use YYYY-MM-DD)"))
    })
}

/// One income or expense entry. Immutable once built; the amount is always
/// non-negative and the direction is carried by [`RecordKind`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord", into = "StoredRecord")]
pub struct Record {
    kind: RecordKind,
    amount: Decimal,
    note: String,
    category: String,
    date: NaiveDate,
}

impl Record {
    pub fn new(
        kind: RecordKind,
        amount: Decimal,
        note: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, LedgerError> {
        Ok(Self {
            kind,
            amount: amount::ensure_in_range(amount)?,
            note: note.into(),
            category: category.into(),
            date,
        })
    }

    /// Builds a record from loosely typed form input.
    pub fn parse(
        kind: RecordKind,
        amount: impl Into<AmountInput>,
        note: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<DateInput>,
    ) -> Result<Self, LedgerError> {
        let amount = amount.into().resolve()?;
        let date = date.into().resolve()?;
        Self::new(kind, amount, note, category, date)
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// On-disk layout: `{ "type", "amount", "note", "category", "date" }`.
#[derive(Serialize, Deserialize)]
struct StoredRecord {
    #[serde(rename = "type")]
    kind: RecordKind,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    amount: Decimal,
    #[serde(default)]
    note: String,
    #[serde(default)]
    category: String,
    date: NaiveDate,
}

impl TryFrom<StoredRecord> for Record {
    type Error = LedgerError;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        Record::new(
            stored.kind,
            stored.amount,
            stored.note,
            stored.category,
            stored.date,
        )
    }
}

impl From<Record> for StoredRecord {
    fn from(record: Record) -> Self {
        Self {
            kind: record.kind,
            amount: record.amount,
            note: record.note,
            category: record.category,
            date: record.date,
        }
    }
}
