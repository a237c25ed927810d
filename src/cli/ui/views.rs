//! Text renderings of the dashboard sections.

use crate::core::services::{Aggregate, CategoryShare, MonthlyTotal, SavingsForecast, TypeTotals};
use crate::domain::{Displayable, Transaction, TransactionType};

use super::formatting::{bar, format_currency, format_percent, Formatter};
use super::table_renderer::{Table, TableColumn};

pub const EMPTY_LEDGER_MESSAGE: &str = "Please add transactions to get started!";
pub const NO_EXPENSES_MESSAGE: &str = "No expenses to show.";

pub fn metrics(totals: &TypeTotals, symbol: &str) -> String {
    Formatter::new().two_column(&[
        ("Total Income", format_currency(totals.income, symbol)),
        ("Total Expenses", format_currency(totals.expense, symbol)),
        ("Net Savings", format_currency(totals.net_savings(), symbol)),
    ])
}

pub fn categories(breakdown: &Aggregate<Vec<CategoryShare>>, symbol: &str) -> String {
    let Some(shares) = breakdown.ready() else {
        return NO_EXPENSES_MESSAGE.to_string();
    };
    let largest = shares.iter().map(|s| s.amount).fold(0.0, f64::max);
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::right("Share"),
        TableColumn::left(""),
    ]);
    for share in shares {
        table.push_row(vec![
            share.category.to_string(),
            format_currency(share.amount, symbol),
            format_percent(share.share),
            bar(share.amount, largest),
        ]);
    }
    table.render()
}

pub fn monthly(months: &[MonthlyTotal], symbol: &str) -> String {
    let largest = months
        .iter()
        .map(|m| m.totals.income.max(m.totals.expense))
        .fold(0.0, f64::max);
    let mut table = Table::new(vec![
        TableColumn::left("Month"),
        TableColumn::left("Type"),
        TableColumn::right("Amount"),
        TableColumn::left(""),
    ]);
    for entry in months {
        for kind in TransactionType::ALL {
            let amount = entry.totals.get(kind);
            let month = if kind == TransactionType::Income {
                entry.month.to_string()
            } else {
                String::new()
            };
            table.push_row(vec![
                month,
                kind.to_string(),
                format_currency(amount, symbol),
                bar(amount, largest),
            ]);
        }
    }
    table.render()
}

pub fn forecast(forecast: &Aggregate<SavingsForecast>, symbol: &str) -> String {
    match forecast {
        Aggregate::Ready(forecast) => {
            let mut table = Table::new(vec![
                TableColumn::left("Month"),
                TableColumn::right("Income"),
                TableColumn::right("Expense"),
                TableColumn::right("Savings"),
                TableColumn::right("vs Average"),
            ]);
            for entry in &forecast.months {
                table.push_row(vec![
                    entry.month.display_label(),
                    format_currency(entry.totals.income, symbol),
                    format_currency(entry.totals.expense, symbol),
                    format_currency(entry.savings, symbol),
                    format_currency(entry.savings - forecast.predicted, symbol),
                ]);
            }
            format!(
                "{}\n\nBased on your data, your predicted monthly savings is: {}",
                table.render(),
                format_currency(forecast.predicted, symbol)
            )
        }
        Aggregate::InsufficientData { missing } => format!(
            "No {} transactions recorded yet. Add both income and expense transactions to see a savings prediction.",
            missing.as_str().to_lowercase()
        ),
        Aggregate::NoData => EMPTY_LEDGER_MESSAGE.to_string(),
    }
}

pub fn history(rows: &[&Transaction], symbol: &str) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Category"),
        TableColumn::left("Type"),
        TableColumn::right("Amount"),
    ]);
    for txn in rows {
        table.push_row(vec![
            txn.date.format("%Y-%m-%d").to_string(),
            txn.category.to_string(),
            txn.kind.to_string(),
            format_currency(txn.amount, symbol),
        ]);
    }
    table.render()
}
