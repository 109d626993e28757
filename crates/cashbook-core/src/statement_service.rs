//! Profit and loss plus balance sheet derivation with a reconciliation check.
//!
//! Revenue and expenses are time-boxed by a [`ReportPeriod`]; assets,
//! liabilities and equity always describe the full current snapshot. Equity
//! is the residual `assets - liabilities`, so a sound classification always
//! reconciles; a difference beyond the tolerance is reported as
//! [`Reconciliation::NotBalanced`].

use std::collections::BTreeMap;

use cashbook_domain::{
    tags::{LOAN_INTEREST, OTHER_BUSINESS, PAYMENT_VOUCHER},
    AssetBreakdown, CategoryView, ContributionType, Direction, EquityBreakdown, ExpenseBreakdown,
    Investment, InvestmentHolding, InvestmentKind, InvoiceKind, LiabilityBreakdown,
    LiabilityKind, LiveStatistics, PeriodFinancials, Reconciliation, ReportPeriod,
    RevenueBreakdown, Snapshot,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{classify, time::Clock};

/// Largest absolute reconciliation difference still treated as balanced.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::ONE;

pub struct FinancialStatementService;

impl FinancialStatementService {
    /// Derives the full statement pair for `period` as seen from `clock`.
    pub fn period_financials(
        snapshot: &Snapshot,
        statistics: &LiveStatistics,
        period: ReportPeriod,
        clock: &dyn Clock,
        tolerance: Decimal,
    ) -> PeriodFinancials {
        let now = clock.now();
        let revenue = Self::revenue(snapshot, period, now);
        let expenses = Self::expenses(snapshot, period, now);
        let total_revenue = revenue.total();
        let total_expenses = expenses.total();
        let net_profit = total_revenue - total_expenses;

        let assets = Self::assets(snapshot, statistics);
        let liabilities = Self::liabilities(snapshot, statistics);
        let total_assets = assets.total();
        let total_liabilities = liabilities.total();

        let equity = Self::equity(
            total_assets,
            total_liabilities,
            snapshot.opening_balances.capital,
            net_profit,
        );
        let total_equity = equity.true_equity;
        let difference = total_assets - (total_liabilities + total_equity);
        let reconciliation = Reconciliation::from_difference(difference, tolerance);

        if reconciliation.is_balanced() {
            debug!(
                period = %period,
                net_profit = %net_profit,
                total_assets = %total_assets,
                "statements derived"
            );
        } else {
            warn!(
                difference = %difference,
                tolerance = %tolerance,
                "balance sheet does not reconcile"
            );
        }

        PeriodFinancials {
            period,
            revenue,
            total_revenue,
            expenses,
            total_expenses,
            net_profit,
            assets,
            total_assets,
            liabilities,
            total_liabilities,
            equity,
            total_equity,
            reconciliation,
        }
    }

    /// Royalty and interest invoices, chit commission, and business-unit
    /// income falling inside `period`.
    pub fn revenue(snapshot: &Snapshot, period: ReportPeriod, now: DateTime<Utc>) -> RevenueBreakdown {
        let in_period = |at: DateTime<Utc>| period.contains(at, now);
        let invoice_total = |kind: InvoiceKind| -> Decimal {
            snapshot
                .invoices
                .iter()
                .filter(|invoice| !invoice.is_void && invoice.kind == kind)
                .filter(|invoice| in_period(invoice.date))
                .map(|invoice| invoice.amount)
                .sum()
        };

        let chit_commission = snapshot
            .chit_groups
            .iter()
            .flat_map(|group| group.auctions.iter())
            .filter(|auction| in_period(auction.date))
            .map(|auction| auction.commission_amount)
            .sum();

        let business_income = snapshot
            .payments
            .iter()
            .filter(|payment| payment.direction == Direction::In)
            .filter(|payment| payment.has_category(OTHER_BUSINESS))
            .filter(|payment| in_period(payment.date))
            .map(|payment| payment.amount)
            .sum();

        RevenueBreakdown {
            royalty: invoice_total(InvoiceKind::Royalty),
            interest: invoice_total(InvoiceKind::Interest),
            chit_commission,
            business_income,
        }
    }

    /// Outflows inside `period` that are true expenses, split into
    /// operational, loan interest and business-unit expense.
    pub fn expenses(snapshot: &Snapshot, period: ReportPeriod, now: DateTime<Utc>) -> ExpenseBreakdown {
        snapshot
            .payments
            .iter()
            .filter(|payment| payment.direction == Direction::Out)
            .filter(|payment| period.contains(payment.date, now))
            .filter(|payment| {
                !classify::is_excluded(CategoryView::Expense, payment.category_or_default())
            })
            .fold(ExpenseBreakdown::default(), |mut breakdown, payment| {
                if payment.has_category(LOAN_INTEREST) {
                    breakdown.loan_interest += payment.amount;
                } else if payment.has_category(OTHER_BUSINESS) {
                    breakdown.business_expense += payment.amount;
                } else if payment.has_voucher_type(PAYMENT_VOUCHER) {
                    breakdown.operational += payment.amount;
                }
                breakdown
            })
    }

    pub fn assets(snapshot: &Snapshot, statistics: &LiveStatistics) -> AssetBreakdown {
        let customer_receivables: Decimal =
            snapshot.customers.iter().map(|customer| customer.receivable()).sum();
        let lending_principal = snapshot
            .customers
            .iter()
            .filter(|customer| customer.is_interest)
            .map(|customer| customer.interest_principal)
            .sum();

        let mut by_kind: BTreeMap<InvestmentKind, Decimal> = BTreeMap::new();
        for investment in &snapshot.investments {
            *by_kind.entry(investment.kind).or_insert(Decimal::ZERO) +=
                Self::investment_value(investment);
        }
        let investments = by_kind
            .into_iter()
            .map(|(kind, value)| InvestmentHolding { kind, value })
            .collect();

        AssetBreakdown {
            cash_in_hand: statistics.cash_in_hand,
            bank_balances: statistics.bank_balances.clone(),
            receivables: statistics.outstanding_receivables + customer_receivables,
            lending_principal,
            investments,
        }
    }

    /// Carrying value of one investment.
    ///
    /// Savings-style schemes are valued at what has been paid in, fixed
    /// deposits at principal, and anything else by its contribution type.
    pub fn investment_value(investment: &Investment) -> Decimal {
        match investment.kind {
            InvestmentKind::ChitSavings
            | InvestmentKind::Lic
            | InvestmentKind::Sip
            | InvestmentKind::GoldSavings => investment.total_paid(),
            InvestmentKind::FixedDeposit => investment.amount_invested,
            InvestmentKind::Other => match investment.contribution_type {
                ContributionType::LumpSum => investment.amount_invested,
                ContributionType::Installment => investment.total_paid(),
            },
        }
    }

    pub fn liabilities(snapshot: &Snapshot, statistics: &LiveStatistics) -> LiabilityBreakdown {
        let principal_of = |kind: LiabilityKind| -> Decimal {
            snapshot
                .liabilities
                .iter()
                .filter(|liability| liability.kind == kind)
                .map(|liability| liability.principal)
                .sum()
        };
        // Lender customers are a second source of private debt, added on top.
        let lender_credit: Decimal = snapshot
            .customers
            .iter()
            .filter(|customer| customer.is_lender)
            .map(|customer| customer.credit_principal)
            .sum();
        let accounts_payable = snapshot
            .invoices
            .iter()
            .filter(|invoice| invoice.is_outstanding() && invoice.direction == Direction::Out)
            .map(|invoice| invoice.balance)
            .sum();
        let customer_advances: Decimal =
            snapshot.customers.iter().map(|customer| customer.advance_owed()).sum();

        LiabilityBreakdown {
            bank_loans: principal_of(LiabilityKind::Bank),
            private_debt: principal_of(LiabilityKind::Private) + lender_credit,
            accounts_payable,
            advances_owed: statistics.advances_owed + customer_advances,
        }
    }

    /// Equity as the residual of the snapshot; `current_net_profit` is carried
    /// for display and is already reflected in assets and liabilities.
    pub fn equity(
        total_assets: Decimal,
        total_liabilities: Decimal,
        opening_capital: Decimal,
        current_net_profit: Decimal,
    ) -> EquityBreakdown {
        let true_equity = total_assets - total_liabilities;
        EquityBreakdown {
            opening_capital,
            historical_reserves: true_equity - opening_capital,
            current_net_profit,
            true_equity,
        }
    }
}
