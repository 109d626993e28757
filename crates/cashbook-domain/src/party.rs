//! Counterparties: customers (who may also lend or borrow) and suppliers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    /// Positive when the customer owes us, negative when we owe them.
    #[serde(default)]
    pub opening_balance: Decimal,
    #[serde(default)]
    pub is_interest: bool,
    #[serde(default)]
    pub interest_principal: Decimal,
    #[serde(default)]
    pub is_lender: bool,
    #[serde(default)]
    pub credit_principal: Decimal,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            opening_balance: Decimal::ZERO,
            is_interest: false,
            interest_principal: Decimal::ZERO,
            is_lender: false,
            credit_principal: Decimal::ZERO,
        }
    }

    pub fn with_opening_balance(mut self, balance: Decimal) -> Self {
        self.opening_balance = balance;
        self
    }

    /// Marks the customer as an interest-bearing borrower of our money.
    pub fn lent_to(mut self, principal: Decimal) -> Self {
        self.is_interest = true;
        self.interest_principal = principal;
        self
    }

    /// Marks the customer as a private lender to the business.
    pub fn borrowed_from(mut self, principal: Decimal) -> Self {
        self.is_lender = true;
        self.credit_principal = principal;
        self
    }

    /// Portion of the opening balance owed to us.
    pub fn receivable(&self) -> Decimal {
        if self.opening_balance > Decimal::ZERO {
            self.opening_balance
        } else {
            Decimal::ZERO
        }
    }

    /// Portion of the opening balance we owe back, as a positive figure.
    pub fn advance_owed(&self) -> Decimal {
        if self.opening_balance < Decimal::ZERO {
            self.opening_balance.abs()
        } else {
            Decimal::ZERO
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub outstanding: Decimal,
}

impl Supplier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: None,
            outstanding: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_balance_splits_by_sign() {
        let owes_us = Customer::new("A").with_opening_balance(Decimal::from(300));
        assert_eq!(owes_us.receivable(), Decimal::from(300));
        assert_eq!(owes_us.advance_owed(), Decimal::ZERO);

        let we_owe = Customer::new("B").with_opening_balance(Decimal::from(-300));
        assert_eq!(we_owe.receivable(), Decimal::ZERO);
        assert_eq!(we_owe.advance_owed(), Decimal::from(300));
    }
}
