use budget_ledger::ledger::{
    category_breakdown, spend_ratio_percent, totals, Record, RecordKind,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn record(kind: RecordKind, amount: Decimal) -> Record {
    let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    Record::new(kind, amount, "", "Other", date).unwrap()
}

#[test]
fn a_million_dimes_sum_exactly() {
    let mut records: Vec<Record> = (0..1_000_000)
        .map(|_| record(RecordKind::Income, dec!(0.10)))
        .collect();
    records.push(record(RecordKind::Expense, dec!(0.30)));

    let totals = totals(&records);
    assert_eq!(totals.income, dec!(100000.00));
    assert_eq!(totals.expense, dec!(0.30));
    assert_eq!(totals.balance, dec!(99999.70));
    assert_eq!(totals.balance, totals.income - totals.expense);
}

#[test]
fn spend_ratio_examples() {
    assert_eq!(spend_ratio_percent(&[]), Decimal::ZERO);

    let records = vec![
        record(RecordKind::Income, dec!(1000)),
        record(RecordKind::Expense, dec!(250)),
    ];
    assert_eq!(spend_ratio_percent(&records), dec!(25));
}

#[test]
fn overspending_exceeds_one_hundred_percent() {
    let records = vec![
        record(RecordKind::Income, dec!(100)),
        record(RecordKind::Expense, dec!(150)),
    ];
    assert_eq!(totals(&records).balance, dec!(-50));
    assert_eq!(spend_ratio_percent(&records), dec!(150));
}

#[test]
fn breakdown_ignores_the_other_kind() {
    let records = vec![
        record(RecordKind::Income, dec!(100)),
        record(RecordKind::Expense, dec!(5)),
    ];
    let rows = category_breakdown(&records, RecordKind::Income);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total, dec!(100));
}
