use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use finance_tracker::core::services::{DashboardService, SummaryService};
use finance_tracker::domain::{Category, Ledger, Transaction, TransactionType};
use finance_tracker::storage::csv_backend::{load_ledger_from_path, save_ledger_to_path};
use tempfile::tempdir;

fn build_sample_ledger(txn_count: usize) -> Ledger {
    let start_date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let transactions = (0..txn_count)
        .map(|idx| {
            let date = start_date + Duration::days((idx % 1095) as i64);
            let (category, kind) = if idx % 10 == 0 {
                (Category::Salary, TransactionType::Income)
            } else {
                let expense = Category::ALL[idx % Category::ALL.len()];
                (expense, TransactionType::Expense)
            };
            Transaction::new(date, category, kind, 20.0 + (idx % 250) as f64).unwrap()
        })
        .collect();
    Ledger::from_transactions(transactions).unwrap()
}

fn bench_aggregation(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));

    c.bench_function("totals_by_type_10k", |b| {
        b.iter(|| black_box(SummaryService::totals_by_type(&ledger)))
    });
    c.bench_function("expense_by_category_10k", |b| {
        b.iter(|| black_box(SummaryService::expense_by_category(&ledger)))
    });
    c.bench_function("savings_forecast_10k", |b| {
        b.iter(|| black_box(SummaryService::savings_forecast(&ledger)))
    });
    c.bench_function("dashboard_render_10k", |b| {
        b.iter(|| black_box(DashboardService::render(&ledger)))
    });
}

fn bench_csv_io(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("finances.csv");

    c.bench_function("csv_save_10k", |b| {
        b.iter(|| save_ledger_to_path(&ledger, &file_path).expect("save ledger"))
    });

    save_ledger_to_path(&ledger, &file_path).expect("seed");

    c.bench_function("csv_load_10k", |b| {
        b.iter(|| black_box(load_ledger_from_path(&file_path).expect("load ledger")))
    });
}

criterion_group!(benches, bench_aggregation, bench_csv_io);
criterion_main!(benches);
