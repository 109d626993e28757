//! Opening balances and the externally maintained running statistics.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of the cash drawer book.
pub const CASH_BOOK: &str = "CASH";
/// Identifier of the CUB bank book.
pub const CUB_BOOK: &str = "CUB";
/// Identifier of the KVB bank book.
pub const KVB_BOOK: &str = "KVB";

/// Book ids match after trimming, ignoring ASCII case. Every book lookup
/// goes through this so ledgers, seeds and audits agree on what a book is.
pub fn same_book(left: &str, right: &str) -> bool {
    left.trim().eq_ignore_ascii_case(right.trim())
}

/// Seed balances for the three books and the owner's opening capital.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct OpeningBalances {
    #[serde(default)]
    pub cash: Decimal,
    #[serde(default)]
    pub cub: Decimal,
    #[serde(default)]
    pub kvb: Decimal,
    #[serde(default)]
    pub capital: Decimal,
}

impl OpeningBalances {
    /// Opening balance for a book id, or `None` for books without a seed.
    pub fn for_book(&self, book: &str) -> Option<Decimal> {
        [
            (CASH_BOOK, self.cash),
            (CUB_BOOK, self.cub),
            (KVB_BOOK, self.kvb),
        ]
        .into_iter()
        .find(|(id, _)| same_book(id, book))
        .map(|(_, balance)| balance)
    }
}

/// Point-in-time figures maintained outside the core and consumed as given by
/// the balance sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LiveStatistics {
    #[serde(default)]
    pub cash_in_hand: Decimal,
    #[serde(default)]
    pub bank_balances: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub outstanding_receivables: Decimal,
    #[serde(default)]
    pub advances_owed: Decimal,
}

impl LiveStatistics {
    pub fn total_bank(&self) -> Decimal {
        self.bank_balances.values().copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn books_resolve_case_insensitively() {
        let balances = OpeningBalances {
            cash: Decimal::from(1000),
            cub: Decimal::from(2000),
            kvb: Decimal::from(3000),
            capital: Decimal::from(10_000),
        };
        assert_eq!(balances.for_book("cash"), Some(Decimal::from(1000)));
        assert_eq!(balances.for_book("KVB"), Some(Decimal::from(3000)));
        assert_eq!(balances.for_book(" cub "), Some(Decimal::from(2000)));
        assert_eq!(balances.for_book("SBI"), None);
    }

    #[test]
    fn opening_balances_use_upper_case_keys() {
        let json = r#"{"CASH": "10", "CAPITAL": "99"}"#;
        let balances: OpeningBalances = serde_json::from_str(json).unwrap();
        assert_eq!(balances.cash, Decimal::from(10));
        assert_eq!(balances.capital, Decimal::from(99));
        assert_eq!(balances.cub, Decimal::ZERO);
    }
}
