use std::{cmp::Ordering, fmt};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::record::{Record, RecordKind};

type RecordFilter = Box<dyn Fn(&Record) -> bool + Send + Sync>;
type RecordOrder = Box<dyn Fn(&Record, &Record) -> Ordering + Send + Sync>;

/// Display-ready projection of a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub kind: RecordKind,
    pub kind_label: &'static str,
    pub category: String,
    pub amount: Decimal,
    pub note: String,
}

impl From<&Record> for HistoryEntry {
    fn from(record: &Record) -> Self {
        Self {
            date: record.date(),
            kind: record.kind(),
            kind_label: record.kind().label(),
            category: record.category().to_string(),
            amount: record.amount(),
            note: record.note().to_string(),
        }
    }
}

/// Optional filter and ordering applied to a history view.
///
/// The default query keeps every record in insertion order. Sorting is
/// stable, so records that compare equal keep their insertion order.
#[derive(Default)]
pub struct HistoryQuery {
    filter: Option<RecordFilter>,
    order: Option<RecordOrder>,
}

impl HistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(kind: RecordKind) -> Self {
        Self::new().filter(move |record| record.kind() == kind)
    }

    /// Records dated within `from..=to`.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self::new().filter(move |record| record.date() >= from && record.date() <= to)
    }

    pub fn newest_first() -> Self {
        Self::new().order_by(|a, b| b.date().cmp(&a.date()))
    }

    /// Adds a predicate; combined with any existing one by logical AND.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        let combined: RecordFilter = if let Some(existing) = self.filter.take() {
            Box::new(move |record: &Record| existing(record) && predicate(record))
        } else {
            Box::new(predicate)
        };
        self.filter = Some(combined);
        self
    }

    /// Replaces the ordering.
    pub fn order_by<F>(mut self, compare: F) -> Self
    where
        F: Fn(&Record, &Record) -> Ordering + Send + Sync + 'static,
    {
        self.order = Some(Box::new(compare));
        self
    }

    fn accepts(&self, record: &Record) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(record))
    }
}

impl fmt::Debug for HistoryQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryQuery")
            .field("filtered", &self.filter.is_some())
            .field("ordered", &self.order.is_some())
            .finish()
    }
}

pub fn history_view(records: &[Record], query: &HistoryQuery) -> Vec<HistoryEntry> {
    let mut selected: Vec<&Record> = records
        .iter()
        .filter(|record| query.accepts(record))
        .collect();
    if let Some(order) = query.order.as_ref() {
        selected.sort_by(|a, b| order(*a, *b));
    }
    selected.into_iter().map(HistoryEntry::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn sample() -> Vec<Record> {
        vec![
            Record::new(RecordKind::Income, dec!(5000), "Maosh", "Salary", day(1)).unwrap(),
            Record::new(RecordKind::Expense, dec!(1200), "Ovqat", "Food", day(2)).unwrap(),
            Record::new(RecordKind::Expense, dec!(30), "bus", "Transport", day(2)).unwrap(),
            Record::new(RecordKind::Income, dec!(300), "", "Bonus", day(5)).unwrap(),
        ]
    }

    #[test]
    fn default_view_keeps_insertion_order() {
        let entries = history_view(&sample(), &HistoryQuery::default());
        let notes: Vec<_> = entries.iter().map(|entry| entry.note.as_str()).collect();
        assert_eq!(notes, ["Maosh", "Ovqat", "bus", ""]);
        assert_eq!(entries[1].kind_label, "Expense");
        assert_eq!(entries[1].amount, dec!(1200));
    }

    #[test]
    fn filters_compose() {
        let query = HistoryQuery::kind(RecordKind::Expense).filter(|r| r.amount() > dec!(100));
        let entries = history_view(&sample(), &query);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, "Food");
    }

    #[test]
    fn date_range_is_inclusive() {
        let entries = history_view(&sample(), &HistoryQuery::between(day(2), day(5)));
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn newest_first_is_stable_for_equal_dates() {
        let entries = history_view(&sample(), &HistoryQuery::newest_first());
        let notes: Vec<_> = entries.iter().map(|entry| entry.note.as_str()).collect();
        assert_eq!(notes, ["", "Ovqat", "bus", "Maosh"]);
    }
}
