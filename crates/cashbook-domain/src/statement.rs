//! Financial statement shapes: profit and loss breakdowns, balance sheet
//! sections, and the reconciliation outcome.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{holdings::InvestmentKind, period::ReportPeriod};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct RevenueBreakdown {
    pub royalty: Decimal,
    pub interest: Decimal,
    pub chit_commission: Decimal,
    pub business_income: Decimal,
}

impl RevenueBreakdown {
    pub fn total(&self) -> Decimal {
        self.royalty + self.interest + self.chit_commission + self.business_income
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ExpenseBreakdown {
    pub operational: Decimal,
    pub loan_interest: Decimal,
    pub business_expense: Decimal,
}

impl ExpenseBreakdown {
    pub fn total(&self) -> Decimal {
        self.operational + self.loan_interest + self.business_expense
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InvestmentHolding {
    pub kind: InvestmentKind,
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AssetBreakdown {
    pub cash_in_hand: Decimal,
    pub bank_balances: BTreeMap<String, Decimal>,
    pub receivables: Decimal,
    pub lending_principal: Decimal,
    /// One entry per investment kind present, in kind order.
    pub investments: Vec<InvestmentHolding>,
}

impl AssetBreakdown {
    pub fn total_bank(&self) -> Decimal {
        self.bank_balances.values().copied().sum()
    }

    pub fn total_investments(&self) -> Decimal {
        self.investments.iter().map(|holding| holding.value).sum()
    }

    pub fn total(&self) -> Decimal {
        self.cash_in_hand
            + self.total_bank()
            + self.receivables
            + self.lending_principal
            + self.total_investments()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct LiabilityBreakdown {
    pub bank_loans: Decimal,
    pub private_debt: Decimal,
    pub accounts_payable: Decimal,
    pub advances_owed: Decimal,
}

impl LiabilityBreakdown {
    pub fn total(&self) -> Decimal {
        self.bank_loans + self.private_debt + self.accounts_payable + self.advances_owed
    }
}

/// Equity as a residual of the snapshot. Only `true_equity` is a total; the
/// other components are informational.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct EquityBreakdown {
    pub opening_capital: Decimal,
    pub historical_reserves: Decimal,
    pub current_net_profit: Decimal,
    pub true_equity: Decimal,
}

/// Outcome of checking `assets == liabilities + equity`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reconciliation {
    Balanced { difference: Decimal },
    NotBalanced { difference: Decimal },
}

impl Reconciliation {
    /// Classifies a difference against an absolute tolerance.
    pub fn from_difference(difference: Decimal, tolerance: Decimal) -> Self {
        if difference.abs() <= tolerance.abs() {
            Reconciliation::Balanced { difference }
        } else {
            Reconciliation::NotBalanced { difference }
        }
    }

    pub fn is_balanced(&self) -> bool {
        matches!(self, Reconciliation::Balanced { .. })
    }

    pub fn difference(&self) -> Decimal {
        match self {
            Reconciliation::Balanced { difference } | Reconciliation::NotBalanced { difference } => {
                *difference
            }
        }
    }
}

/// Profit and loss for one period plus the balance sheet of the current
/// snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodFinancials {
    pub period: ReportPeriod,
    pub revenue: RevenueBreakdown,
    pub total_revenue: Decimal,
    pub expenses: ExpenseBreakdown,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub assets: AssetBreakdown,
    pub total_assets: Decimal,
    pub liabilities: LiabilityBreakdown,
    pub total_liabilities: Decimal,
    pub equity: EquityBreakdown,
    pub total_equity: Decimal,
    pub reconciliation: Reconciliation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconciliation_respects_tolerance() {
        let within = Reconciliation::from_difference(Decimal::new(5, 1), Decimal::ONE);
        assert!(within.is_balanced());
        let edge = Reconciliation::from_difference(Decimal::NEGATIVE_ONE, Decimal::ONE);
        assert!(edge.is_balanced());
        let off = Reconciliation::from_difference(Decimal::from(12), Decimal::ONE);
        assert!(!off.is_balanced());
        assert_eq!(off.difference(), Decimal::from(12));
    }

    #[test]
    fn reconciliation_serializes_with_state_tag() {
        let json = serde_json::to_value(Reconciliation::NotBalanced {
            difference: Decimal::from(3),
        })
        .unwrap();
        assert_eq!(json["state"], "NOT_BALANCED");
    }
}
