//! Totals, balance and spend-ratio computations over a record snapshot.
//!
//! Everything here is a pure function of the slice it is given. Sums use
//! exact decimal arithmetic, so a million additions of `0.10` land on
//! `100000.00` with no drift. Arithmetic is checked: a result outside the
//! `Decimal` range saturates and is logged instead of panicking.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use super::record::{Record, RecordKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl Totals {
    /// Share of income already spent, or the no-income signal.
    pub fn spend_ratio(&self) -> SpendRatio {
        if self.income > Decimal::ZERO {
            SpendRatio::Percent(percent_of(self.expense, self.income))
        } else {
            SpendRatio::NoIncome {
                expense: self.expense,
            }
        }
    }

    /// The three bars of the balance chart, in display order.
    pub fn chart_series(&self) -> [ChartBar; 3] {
        [
            ChartBar {
                label: RecordKind::Income.label(),
                value: self.income,
            },
            ChartBar {
                label: RecordKind::Expense.label(),
                value: self.expense,
            },
            ChartBar {
                label: "Balance",
                value: self.balance,
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: Decimal,
}

/// Expense as a percentage of income.
///
/// `NoIncome` is returned instead of a number when nothing has been earned,
/// since any percentage would misreport expenses recorded against zero income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendRatio {
    Percent(Decimal),
    NoIncome { expense: Decimal },
}

impl SpendRatio {
    /// Percentage with the no-income case collapsed to zero.
    pub fn percent_or_zero(&self) -> Decimal {
        match self {
            SpendRatio::Percent(value) => *value,
            SpendRatio::NoIncome { .. } => Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
}

pub fn totals(records: &[Record]) -> Totals {
    let (income, expense) = records.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expense), record| match record.kind() {
            RecordKind::Income => (add_amounts(income, record.amount()), expense),
            RecordKind::Expense => (income, add_amounts(expense, record.amount())),
        },
    );
    Totals {
        income,
        expense,
        // Both sides are non-negative, so the difference stays in range.
        balance: income - expense,
    }
}

pub fn spend_ratio(records: &[Record]) -> SpendRatio {
    totals(records).spend_ratio()
}

/// `expense / income * 100`, or zero when there is no income.
pub fn spend_ratio_percent(records: &[Record]) -> Decimal {
    spend_ratio(records).percent_or_zero()
}

/// Per-category sums for one kind, ordered by first appearance.
pub fn category_breakdown(records: &[Record], kind: RecordKind) -> Vec<CategoryTotal> {
    let mut rows: Vec<CategoryTotal> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for record in records.iter().filter(|record| record.kind() == kind) {
        match positions.get(record.category()) {
            Some(&index) => {
                let row = &mut rows[index];
                row.total = add_amounts(row.total, record.amount());
                row.count += 1;
            }
            None => {
                positions.insert(record.category(), rows.len());
                rows.push(CategoryTotal {
                    category: record.category().to_string(),
                    total: record.amount(),
                    count: 1,
                });
            }
        }
    }
    rows
}

fn add_amounts(left: Decimal, right: Decimal) -> Decimal {
    left.checked_add(right).unwrap_or_else(|| {
        warn!(%left, %right, "amount sum overflowed; saturating");
        Decimal::MAX
    })
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .or_else(|| {
            part.checked_div(whole)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        })
        .unwrap_or_else(|| {
            warn!(%part, %whole, "spend ratio overflowed; saturating");
            Decimal::MAX
        })
}
