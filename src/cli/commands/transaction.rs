use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms::{DialoguerInteraction, FormResult, TransactionForm};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::formatting::format_currency;
use crate::domain::Transaction;

const ADD_USAGE: &str = "add <date> <category> <Income|Expense> <amount>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "add",
        "Record an income or expense transaction",
        ADD_USAGE,
        cmd_add,
    )
    .with_aliases(&["new"])]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] if context.can_prompt() => add_interactive(context),
        [date, category, kind, amount] => {
            context.record_fields(date, category, kind, amount)?;
            confirm_added(context);
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!("usage: {}", ADD_USAGE))),
    }
}

fn add_interactive(context: &mut ShellContext) -> CommandResult {
    let result = {
        let mut interaction = DialoguerInteraction::new(context.theme());
        TransactionForm::default().run(&mut interaction)?
    };
    match result {
        FormResult::Completed(transaction) => {
            context.record(transaction)?;
            confirm_added(context);
        }
        FormResult::Cancelled => output::info("Operation cancelled."),
    }
    Ok(())
}

fn confirm_added(context: &ShellContext) {
    if let Some(txn) = context.ledger().transactions().last() {
        output::success(format!("Added! {}", describe(txn, context.currency_symbol())));
    }
}

fn describe(txn: &Transaction, symbol: &str) -> String {
    format!(
        "{} {} {} {}",
        txn.date.format("%Y-%m-%d"),
        txn.category,
        txn.kind,
        format_currency(txn.amount, symbol)
    )
}
