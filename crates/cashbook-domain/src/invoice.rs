//! Invoices raised or received; source of royalty and interest revenue and of
//! accounts payable.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: Uuid,
    pub kind: InvoiceKind,
    pub direction: Direction,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    /// Amount still outstanding.
    pub balance: Decimal,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub is_void: bool,
}

impl Invoice {
    pub fn new(
        kind: InvoiceKind,
        direction: Direction,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            direction,
            amount,
            date,
            balance: amount,
            status: InvoiceStatus::Unpaid,
            is_void: false,
        }
    }

    pub fn with_settlement(mut self, balance: Decimal, status: InvoiceStatus) -> Self {
        self.balance = balance;
        self.status = status;
        self
    }

    pub fn voided(mut self) -> Self {
        self.is_void = true;
        self
    }

    /// True for non-void invoices that are not fully paid.
    pub fn is_outstanding(&self) -> bool {
        !self.is_void && self.status != InvoiceStatus::Paid
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceKind {
    Royalty,
    Interest,
    #[serde(other)]
    Other,
}

impl fmt::Display for InvoiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvoiceKind::Royalty => "Royalty",
            InvoiceKind::Interest => "Interest",
            InvoiceKind::Other => "Other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Paid,
    Partial,
    Unpaid,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn outstanding_excludes_void_and_paid() {
        let date = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let open = Invoice::new(InvoiceKind::Other, Direction::Out, Decimal::from(90), date);
        assert!(open.is_outstanding());
        assert!(!open.clone().voided().is_outstanding());
        let paid = open.with_settlement(Decimal::ZERO, InvoiceStatus::Paid);
        assert!(!paid.is_outstanding());
    }

    #[test]
    fn unknown_kind_deserializes_as_other() {
        let kind: InvoiceKind = serde_json::from_str("\"SERVICE\"").unwrap();
        assert_eq!(kind, InvoiceKind::Other);
    }
}
