//! Assembles every dashboard section from a single ledger snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::{Ledger, Transaction};

use super::summary_service::{
    Aggregate, CategoryShare, MonthlyTotal, SavingsForecast, SummaryService, TypeTotals,
};

/// View model handed to the presentation layer after each command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Dashboard {
    /// No transactions recorded yet; show the getting-started prompt instead.
    Empty,
    Populated(DashboardView),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    pub totals: TypeTotals,
    pub categories: Aggregate<Vec<CategoryShare>>,
    pub monthly: Vec<MonthlyTotal>,
    pub forecast: Aggregate<SavingsForecast>,
    pub history: Vec<Transaction>,
}

pub struct DashboardService;

impl DashboardService {
    pub fn render(ledger: &Ledger) -> Dashboard {
        let Aggregate::Ready(totals) = SummaryService::totals_by_type(ledger) else {
            tracing::debug!("ledger is empty; rendering getting-started dashboard");
            return Dashboard::Empty;
        };

        let view = DashboardView {
            totals,
            categories: SummaryService::expense_by_category(ledger),
            monthly: SummaryService::monthly_totals(ledger)
                .into_ready()
                .unwrap_or_default(),
            forecast: SummaryService::savings_forecast(ledger),
            history: SummaryService::history(ledger)
                .into_iter()
                .cloned()
                .collect(),
        };
        tracing::debug!(
            transactions = ledger.len(),
            months = view.monthly.len(),
            forecast_ready = view.forecast.is_ready(),
            "rendered dashboard"
        );
        Dashboard::Populated(view)
    }
}
