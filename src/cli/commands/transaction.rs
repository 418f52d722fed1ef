use chrono::Local;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::format_amount;
use crate::cli::registry::CommandEntry;
use crate::ledger::{DateInput, RecordKind};

const MAX_ARGS: usize = 4;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "income",
            "Record an income",
            "income <amount> [category] [note] [YYYY-MM-DD]",
            cmd_income,
        ),
        CommandEntry::new(
            "expense",
            "Record an expense",
            "expense <amount> [category] [note] [YYYY-MM-DD]",
            cmd_expense,
        ),
    ]
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    record(context, RecordKind::Income, args)
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    record(context, RecordKind::Expense, args)
}

fn record(context: &mut ShellContext, kind: RecordKind, args: &[&str]) -> CommandResult {
    let Some(amount) = args.first().copied() else {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {} <amount> [category] [note] [YYYY-MM-DD]",
            kind
        )));
    };
    if args.len() > MAX_ARGS {
        return Err(CommandError::InvalidArguments(
            "too many arguments; quote a note that contains spaces".into(),
        ));
    }

    let category = match args.get(1) {
        Some(category) => category.to_string(),
        None => context.default_category(kind),
    };
    let note = args.get(2).copied().unwrap_or_default();
    let date = match args.get(3) {
        Some(text) => DateInput::from(*text),
        None => DateInput::from(Local::now().date_naive()),
    };

    let record = context
        .service
        .record_transaction(kind, amount, note, category, date)?;
    io::print_success(format!(
        "{} added: {} {} ({}, {})",
        kind.label(),
        format_amount(record.amount(), context.config.amount_precision),
        context.currency_label(),
        record.category(),
        record.date()
    ));
    Ok(())
}
