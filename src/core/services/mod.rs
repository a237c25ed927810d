pub mod dashboard_service;
pub mod summary_service;
pub mod transaction_service;

pub use dashboard_service::{Dashboard, DashboardService, DashboardView};
pub use summary_service::{
    Aggregate, CategoryShare, MonthlySavings, MonthlyTotal, SavingsForecast, SummaryService,
    TypeTotals,
};
pub use transaction_service::TransactionService;

#[cfg(test)]
mod tests;
