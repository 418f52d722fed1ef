use rust_decimal::Decimal;

use crate::cli::commands::parse_kind_arg;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{format_amount, format_percent, plain, section};
use crate::cli::registry::CommandEntry;
use crate::ledger::{HistoryEntry, HistoryQuery, RecordKind, SpendRatio};

const NEWEST_FLAG: &str = "--newest";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "balance",
            "Show income, expense, balance and share of income spent",
            "balance",
            cmd_balance,
        ),
        CommandEntry::new(
            "history",
            "List recorded transactions",
            "history [income|expense] [--newest]",
            cmd_history,
        ),
        CommandEntry::new(
            "breakdown",
            "Totals per category",
            "breakdown [income|expense]",
            cmd_breakdown,
        ),
        CommandEntry::new(
            "categories",
            "Show suggested categories",
            "categories [income|expense]",
            cmd_categories,
        ),
    ]
}

fn cmd_balance(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = context.service.totals();
    section("Balance");
    for bar in totals.chart_series() {
        plain(format!(
            "  {:<8} {:>16} {}",
            bar.label,
            money(context, bar.value),
            context.currency_label()
        ));
    }

    if totals.expense > Decimal::ZERO {
        match context.service.spend_ratio_signal() {
            SpendRatio::Percent(percent) => io::print_info(format!(
                "You have spent {}% of your income.",
                format_percent(percent)
            )),
            SpendRatio::NoIncome { expense } => io::print_warning(format!(
                "{} {} spent with no income recorded.",
                money(context, expense),
                context.currency_label()
            )),
        }
    }
    Ok(())
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let newest = args.contains(&NEWEST_FLAG);
    let rest: Vec<&str> = args
        .iter()
        .copied()
        .filter(|arg| *arg != NEWEST_FLAG)
        .collect();
    if rest.len() > 1 {
        return Err(CommandError::InvalidArguments(
            "usage: history [income|expense] [--newest]".into(),
        ));
    }

    let mut query = if newest {
        HistoryQuery::newest_first()
    } else {
        HistoryQuery::new()
    };
    if let Some(kind) = parse_kind_arg(rest.first())? {
        query = query.filter(move |record| record.kind() == kind);
    }

    let entries = context.service.history_with(&query);
    if entries.is_empty() {
        io::print_info("No records found.");
        return Ok(());
    }
    for entry in &entries {
        plain(history_line(context, entry));
    }
    Ok(())
}

fn history_line(context: &ShellContext, entry: &HistoryEntry) -> String {
    format!(
        "{} | {:<8} | {:<10} | {:>10} {} | {}",
        entry.date,
        entry.kind_label,
        entry.category,
        money(context, entry.amount),
        context.currency_label(),
        entry.note
    )
}

fn cmd_breakdown(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = parse_kind_arg(args.first())?.unwrap_or(RecordKind::Expense);
    let rows = context.service.category_breakdown(kind);
    section(format!("{} by category", kind.label()));
    if rows.is_empty() {
        io::print_info("No records found.");
        return Ok(());
    }
    for row in &rows {
        plain(format!(
            "  {:<14} {:>14} {}  ({} entries)",
            row.category,
            money(context, row.total),
            context.currency_label(),
            row.count
        ));
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kinds = match parse_kind_arg(args.first())? {
        Some(kind) => vec![kind],
        None => RecordKind::ALL.to_vec(),
    };
    for kind in kinds {
        plain(format!(
            "{}: {}",
            kind.label(),
            context.config.categories_for(kind).join(", ")
        ));
    }
    Ok(())
}

fn money(context: &ShellContext, value: Decimal) -> String {
    format_amount(value, context.config.amount_precision)
}
