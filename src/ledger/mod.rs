//! Ledger records and the pure aggregation engine that runs over them.

pub mod aggregate;
pub mod amount;
pub mod history;
pub mod record;

pub use aggregate::{
    category_breakdown, spend_ratio, spend_ratio_percent, totals, CategoryTotal, ChartBar,
    SpendRatio, Totals,
};
pub use amount::{AmountInput, MAX_AMOUNT};
pub use history::{history_view, HistoryEntry, HistoryQuery};
pub use record::{parse_date, DateInput, Record, RecordKind, DATE_FORMAT};
