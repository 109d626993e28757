//! Debts, investments, and chit-fund groups held by the business.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Liability {
    pub id: Uuid,
    pub kind: LiabilityKind,
    pub principal: Decimal,
}

impl Liability {
    pub fn new(kind: LiabilityKind, principal: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            principal,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiabilityKind {
    Bank,
    Private,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Investment {
    pub id: Uuid,
    pub kind: InvestmentKind,
    pub amount_invested: Decimal,
    pub contribution_type: ContributionType,
    #[serde(default)]
    pub transactions: Vec<InvestmentTransaction>,
}

impl Investment {
    pub fn new(
        kind: InvestmentKind,
        amount_invested: Decimal,
        contribution_type: ContributionType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount_invested,
            contribution_type,
            transactions: Vec::new(),
        }
    }

    pub fn with_transaction(mut self, amount_paid: Decimal, date: DateTime<Utc>) -> Self {
        self.transactions
            .push(InvestmentTransaction { amount_paid, date });
        self
    }

    /// Sum of every instalment paid so far.
    pub fn total_paid(&self) -> Decimal {
        self.transactions.iter().map(|txn| txn.amount_paid).sum()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentKind {
    ChitSavings,
    Lic,
    Sip,
    GoldSavings,
    FixedDeposit,
    #[serde(other)]
    Other,
}

impl fmt::Display for InvestmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvestmentKind::ChitSavings => "Chit Savings",
            InvestmentKind::Lic => "LIC",
            InvestmentKind::Sip => "SIP",
            InvestmentKind::GoldSavings => "Gold Savings",
            InvestmentKind::FixedDeposit => "Fixed Deposit",
            InvestmentKind::Other => "Other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionType {
    LumpSum,
    Installment,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestmentTransaction {
    pub amount_paid: Decimal,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChitGroup {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub auctions: Vec<ChitAuction>,
}

impl ChitGroup {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            auctions: Vec::new(),
        }
    }

    pub fn with_auction(mut self, date: DateTime<Utc>, commission_amount: Decimal) -> Self {
        self.auctions.push(ChitAuction {
            date,
            commission_amount,
        });
        self
    }
}

impl Default for ChitGroup {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChitAuction {
    pub date: DateTime<Utc>,
    /// Foreman commission earned on the auction; only this part is revenue.
    pub commission_amount: Decimal,
}
