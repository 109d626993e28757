//! Derived ledger shapes: rows wrap a borrowed payment plus the figure the
//! replay computed for it.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    common::{Direction, DirectionFilter, ParseError},
    payment::Payment,
};

/// One row of a chronological book replay.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct LedgerRow<'a> {
    pub payment: &'a Payment,
    /// Book balance after applying this payment.
    pub running_balance: Decimal,
}

/// Book (or business-unit) ledger replayed from an opening balance.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountLedger<'a> {
    pub book: String,
    pub filter: DirectionFilter,
    pub opening_balance: Decimal,
    /// Balance after the last record, ignoring the display filter.
    pub closing_balance: Decimal,
    /// Display rows, ascending by date, restricted to `filter`.
    pub rows: Vec<LedgerRow<'a>>,
    pub total_in: Decimal,
    pub total_out: Decimal,
}

impl<'a> AccountLedger<'a> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn balances(&self) -> Vec<Decimal> {
        self.rows.iter().map(|row| row.running_balance).collect()
    }
}

/// Which side of the category ledger is being viewed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryView {
    Income,
    Expense,
}

impl CategoryView {
    pub fn direction(self) -> Direction {
        match self {
            CategoryView::Income => Direction::In,
            CategoryView::Expense => Direction::Out,
        }
    }
}

impl fmt::Display for CategoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryView::Income => "Income",
            CategoryView::Expense => "Expense",
        };
        f.write_str(label)
    }
}

impl FromStr for CategoryView {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(CategoryView::Income),
            "expense" | "expenses" | "out" => Ok(CategoryView::Expense),
            _ => Err(ParseError::new("ledger view", value)),
        }
    }
}

/// Category selector: every category, or one exact tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parses a user selector; `all` (any case) or blank selects every category.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(trimmed.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(expected) => expected == category,
        }
    }
}

/// One row of a category ledger, newest first.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CategoryRow<'a> {
    pub payment: &'a Payment,
    /// Cumulative total of this row and every older shown row.
    pub running_total: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryLedger<'a> {
    pub view: CategoryView,
    pub filter: CategoryFilter,
    pub search: String,
    /// Display rows, descending by date.
    pub rows: Vec<CategoryRow<'a>>,
    pub grand_total: Decimal,
    /// Distinct categories after exclusions, independent of filter and search.
    pub categories: Vec<String>,
}

impl<'a> CategoryLedger<'a> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
