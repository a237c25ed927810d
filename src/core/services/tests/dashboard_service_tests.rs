use crate::core::services::{Aggregate, Dashboard, DashboardService};
use crate::domain::{Category, Ledger, TransactionType};

use super::{ledger_of, two_month_ledger, txn};

#[test]
fn empty_ledger_renders_getting_started_dashboard() {
    assert_eq!(DashboardService::render(&Ledger::new()), Dashboard::Empty);
}

#[test]
fn populated_dashboard_carries_every_section() {
    let ledger = two_month_ledger();
    let Dashboard::Populated(view) = DashboardService::render(&ledger) else {
        panic!("expected populated dashboard");
    };
    assert_eq!(view.totals.income, 4000.0);
    assert_eq!(view.totals.expense, 1050.0);
    assert_eq!(view.monthly.len(), 2);
    assert_eq!(view.history.len(), 4);
    assert_eq!(view.history[0].category, Category::Salary);
    let forecast = view.forecast.ready().expect("forecast");
    assert_eq!(forecast.predicted, 1475.0);
    assert!(view.categories.is_ready());
}

#[test]
fn expense_only_dashboard_omits_forecast_but_keeps_metrics() {
    let ledger = ledger_of(vec![txn(
        (2024, 5, 1),
        Category::Rent,
        TransactionType::Expense,
        800.0,
    )]);
    let Dashboard::Populated(view) = DashboardService::render(&ledger) else {
        panic!("expected populated dashboard");
    };
    assert_eq!(view.totals.income, 0.0);
    assert_eq!(view.totals.net_savings(), -800.0);
    assert_eq!(
        view.forecast,
        Aggregate::InsufficientData {
            missing: TransactionType::Income
        }
    );
}
