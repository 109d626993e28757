use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::{
    account_ledger_service::AccountLedgerService, business_unit_service::BusinessUnitService,
    category_ledger_service::CategoryLedgerService, statement_service::FinancialStatementService,
    statistics_service::StatisticsService, time::FixedClock, DEFAULT_TOLERANCE,
};
use cashbook_domain::{
    CategoryFilter, CategoryView, Customer, Direction, DirectionFilter, Invoice, InvoiceKind,
    OpeningBalances, Payment, ReportPeriod, Snapshot,
};

fn at(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 11, 0, 0).unwrap()
}

fn sample_snapshot() -> Snapshot {
    let mut snapshot = Snapshot::new(OpeningBalances {
        cash: Decimal::from(1_000),
        cub: Decimal::from(5_000),
        kvb: Decimal::from(2_000),
        capital: Decimal::from(6_000),
    });
    snapshot.add_payment(
        Payment::new(Direction::In, Decimal::from(500), at(5, 2), "CASH")
            .with_category("SALES")
            .with_counterparty("c-1", "Ravi Traders"),
    );
    snapshot.add_payment(
        Payment::new(Direction::Out, Decimal::from(200), at(5, 3), "CASH")
            .with_category("RENT")
            .with_voucher_type("PAYMENT"),
    );
    snapshot.add_payment(
        Payment::new(Direction::Out, Decimal::from(1_000), at(5, 4), "CUB")
            .with_category("CONTRA")
            .with_target_mode("CASH"),
    );
    snapshot.add_payment(
        Payment::new(Direction::In, Decimal::from(1_000), at(5, 4), "CASH")
            .with_category("CONTRA")
            .with_target_mode("CUB"),
    );
    snapshot.add_payment(
        Payment::new(Direction::In, Decimal::from(800), at(5, 10), "KVB")
            .with_category("OTHER_BUSINESS")
            .with_business_unit("Dairy"),
    );
    snapshot.add_payment(
        Payment::new(Direction::Out, Decimal::from(300), at(5, 11), "KVB")
            .with_category("OTHER_BUSINESS")
            .with_business_unit("Dairy"),
    );
    snapshot.add_invoice(Invoice::new(
        InvoiceKind::Royalty,
        Direction::In,
        Decimal::from(450),
        at(5, 20),
    ));
    snapshot.add_customer(Customer::new("Kumar").with_opening_balance(Decimal::from(-300)));
    snapshot
}

#[test]
fn contra_transfer_moves_money_between_books_without_touching_profit() {
    let snapshot = sample_snapshot();
    assert_eq!(
        AccountLedgerService::closing_balance(&snapshot, "CASH"),
        Decimal::from(2_300)
    );
    assert_eq!(
        AccountLedgerService::closing_balance(&snapshot, "CUB"),
        Decimal::from(4_000)
    );

    let expenses = CategoryLedgerService::build(
        CategoryView::Expense,
        &CategoryFilter::All,
        "",
        &snapshot.payments,
    );
    assert!(expenses
        .rows
        .iter()
        .all(|row| !row.payment.has_category("CONTRA")));
}

#[test]
fn derived_statistics_feed_a_balanced_sheet() {
    let snapshot = sample_snapshot();
    let statistics = StatisticsService::resolve(&snapshot, &["CUB", "KVB"]);
    assert_eq!(statistics.cash_in_hand, Decimal::from(2_300));
    assert_eq!(statistics.total_bank(), Decimal::from(4_000 + 2_500));
    assert_eq!(statistics.outstanding_receivables, Decimal::from(450));

    let clock = FixedClock(at(5, 28));
    let financials = FinancialStatementService::period_financials(
        &snapshot,
        &statistics,
        ReportPeriod::ThisMonth,
        &clock,
        DEFAULT_TOLERANCE,
    );

    assert_eq!(financials.revenue.royalty, Decimal::from(450));
    assert_eq!(financials.revenue.business_income, Decimal::from(800));
    assert_eq!(financials.expenses.operational, Decimal::from(200));
    assert_eq!(financials.expenses.business_expense, Decimal::from(300));
    assert_eq!(financials.net_profit, Decimal::from(750));
    assert_eq!(financials.liabilities.advances_owed, Decimal::from(300));
    assert!(financials.reconciliation.is_balanced());
    assert_eq!(
        financials.total_assets,
        financials.total_liabilities + financials.total_equity
    );
}

#[test]
fn next_month_view_moves_current_figures_to_last_month() {
    let snapshot = sample_snapshot();
    let statistics = StatisticsService::resolve(&snapshot, &["CUB", "KVB"]);
    let clock = FixedClock(at(6, 2));

    let this_month = FinancialStatementService::period_financials(
        &snapshot,
        &statistics,
        ReportPeriod::ThisMonth,
        &clock,
        DEFAULT_TOLERANCE,
    );
    assert_eq!(this_month.total_revenue, Decimal::ZERO);
    assert_eq!(this_month.total_expenses, Decimal::ZERO);

    let last_month = FinancialStatementService::period_financials(
        &snapshot,
        &statistics,
        ReportPeriod::LastMonth,
        &clock,
        DEFAULT_TOLERANCE,
    );
    assert_eq!(last_month.net_profit, Decimal::from(750));
    assert_eq!(last_month.total_assets, this_month.total_assets);
}

#[test]
fn business_unit_figures_agree_with_unit_ledger() {
    let snapshot = sample_snapshot();
    let report = BusinessUnitService::summarize(&["Dairy"], &snapshot.payments);
    let ledger = BusinessUnitService::ledger("Dairy", &snapshot.payments, DirectionFilter::All);
    assert_eq!(report.units[0].totals.net, ledger.closing_balance);
    assert_eq!(ledger.total_in, report.units[0].totals.income);
}

#[test]
fn category_search_finds_counterparty_case_insensitively() {
    let snapshot = sample_snapshot();
    let ledger = CategoryLedgerService::build(
        CategoryView::Income,
        &CategoryFilter::All,
        "RAVI",
        &snapshot.payments,
    );
    assert_eq!(ledger.rows.len(), 1);
    assert_eq!(ledger.grand_total, Decimal::from(500));
}
