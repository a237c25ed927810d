//! Read-only views over the ledger. Each command reloads before rendering.

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::views;
use crate::core::services::{Aggregate, Dashboard, SummaryService};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dashboard",
            "Show every dashboard section",
            "dashboard",
            cmd_dashboard,
        )
        .with_aliases(&["dash"]),
        CommandEntry::new(
            "summary",
            "Total income, total expenses and net savings",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "categories",
            "Spending by category with share of total",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "monthly",
            "Income vs expenses per month",
            "monthly",
            cmd_monthly,
        ),
        CommandEntry::new(
            "forecast",
            "Monthly savings and the predicted monthly savings",
            "forecast",
            cmd_forecast,
        )
        .with_aliases(&["predict"]),
        CommandEntry::new(
            "history",
            "Transactions, newest first",
            "history [limit|all]",
            cmd_history,
        ),
    ]
}

pub(crate) fn print_dashboard(context: &mut ShellContext) -> CommandResult {
    let symbol = context.currency_symbol().to_string();
    let limit = context.config.history_limit;
    let view = match context.dashboard()? {
        Dashboard::Empty => {
            output::info(views::EMPTY_LEDGER_MESSAGE);
            return Ok(());
        }
        Dashboard::Populated(view) => view,
    };

    output::section("Summary");
    output::info(views::metrics(&view.totals, &symbol));
    output::section("Spending by Category");
    output::info(views::categories(&view.categories, &symbol));
    output::section("Income vs Expenses Over Time");
    output::info(views::monthly(&view.monthly, &symbol));
    output::section("Monthly Savings Prediction");
    output::info(views::forecast(&view.forecast, &symbol));
    output::section("Transaction History");
    let rows: Vec<_> = view.history.iter().take(limit_or_all(limit)).collect();
    output::info(views::history(&rows, &symbol));
    Ok(())
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_dashboard(context)
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let symbol = context.currency_symbol().to_string();
    let ledger = context.reload()?;
    output::section("Summary");
    match SummaryService::totals_by_type(ledger) {
        Aggregate::Ready(totals) => output::info(views::metrics(&totals, &symbol)),
        _ => output::info(views::EMPTY_LEDGER_MESSAGE),
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let symbol = context.currency_symbol().to_string();
    let ledger = context.reload()?;
    output::section("Spending by Category");
    if ledger.is_empty() {
        output::info(views::EMPTY_LEDGER_MESSAGE);
    } else {
        output::info(views::categories(
            &SummaryService::expense_by_category(ledger),
            &symbol,
        ));
    }
    Ok(())
}

fn cmd_monthly(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let symbol = context.currency_symbol().to_string();
    let ledger = context.reload()?;
    output::section("Income vs Expenses Over Time");
    match SummaryService::monthly_totals(ledger) {
        Aggregate::Ready(months) => output::info(views::monthly(&months, &symbol)),
        _ => output::info(views::EMPTY_LEDGER_MESSAGE),
    }
    Ok(())
}

fn cmd_forecast(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let symbol = context.currency_symbol().to_string();
    let ledger = context.reload()?;
    output::section("Monthly Savings Prediction");
    output::info(views::forecast(
        &SummaryService::savings_forecast(ledger),
        &symbol,
    ));
    Ok(())
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        None => context.config.history_limit,
        Some(value) if value.eq_ignore_ascii_case("all") => 0,
        Some(value) => value.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!(
                "history limit must be a number or `all`, got `{}`",
                value
            ))
        })?,
    };
    let symbol = context.currency_symbol().to_string();
    let ledger = context.reload()?;
    output::section("Transaction History");
    if ledger.is_empty() {
        output::info(views::EMPTY_LEDGER_MESSAGE);
        return Ok(());
    }
    let rows = SummaryService::history(ledger);
    let shown: Vec<_> = rows.iter().copied().take(limit_or_all(limit)).collect();
    output::info(views::history(&shown, &symbol));
    if shown.len() < rows.len() {
        output::hint(format!(
            "Showing {} of {} transactions. Use `history all` to see everything.",
            shown.len(),
            rows.len()
        ));
    }
    Ok(())
}

/// A limit of zero means no limit.
fn limit_or_all(limit: usize) -> usize {
    if limit == 0 {
        usize::MAX
    } else {
        limit
    }
}
