//! Payment records: the flat cash-movement log every view is derived from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{balances::same_book, common::*};

/// Well-known category and voucher tags carried on payments.
pub mod tags {
    /// Internal transfer between two owned books.
    pub const CONTRA: &str = "CONTRA";
    /// Principal repaid against a loan.
    pub const LOAN_REPAYMENT: &str = "LOAN_REPAYMENT";
    /// Interest paid on a loan.
    pub const LOAN_INTEREST: &str = "LOAN_INTEREST";
    /// Instalment paid into a chit fund held as savings.
    pub const CHIT_SAVINGS: &str = "CHIT_SAVINGS";
    /// Side-operation income and expense tracked per business unit.
    pub const OTHER_BUSINESS: &str = "OTHER_BUSINESS";
    /// Prefix shared by every asset-acquisition category.
    pub const INVESTMENT_PREFIX: &str = "INVESTMENT_";
    /// Voucher type of an ordinary payment voucher.
    pub const PAYMENT_VOUCHER: &str = "PAYMENT";
    /// Grouping label used when a payment carries no category.
    pub const DEFAULT_CATEGORY: &str = "Other";
}

/// A single cash movement in or out of one book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub direction: Direction,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    /// Book the movement is recorded against (`CASH` or a bank id).
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voucher_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Optional payment fields that can stand in for a display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelField {
    Notes,
    Category,
    VoucherType,
}

/// Order in which label fields are consulted; the first non-blank value wins
/// and [`tags::DEFAULT_CATEGORY`] is used when all are blank.
pub const LABEL_FALLBACK: [LabelField; 3] =
    [LabelField::Notes, LabelField::Category, LabelField::VoucherType];

impl Payment {
    pub fn new(
        direction: Direction,
        amount: Decimal,
        date: DateTime<Utc>,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            direction,
            amount,
            date,
            mode: mode.into(),
            target_mode: None,
            category: None,
            voucher_type: None,
            source_id: None,
            source_name: None,
            business_unit: None,
            notes: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_voucher_type(mut self, voucher_type: impl Into<String>) -> Self {
        self.voucher_type = Some(voucher_type.into());
        self
    }

    pub fn with_counterparty(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.source_id = Some(id.into());
        self.source_name = Some(name.into());
        self
    }

    pub fn with_business_unit(mut self, unit: impl Into<String>) -> Self {
        self.business_unit = Some(unit.into());
        self
    }

    pub fn with_target_mode(mut self, target: impl Into<String>) -> Self {
        self.target_mode = Some(target.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Amount with the direction's sign applied.
    pub fn signed_amount(&self) -> Decimal {
        self.direction.signed(self.amount)
    }

    /// Category used for grouping, defaulting to `"Other"` when absent.
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(tags::DEFAULT_CATEGORY)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.category_or_default() == category
    }

    pub fn has_voucher_type(&self, voucher_type: &str) -> bool {
        self.voucher_type.as_deref() == Some(voucher_type)
    }

    pub fn is_in_book(&self, book: &str) -> bool {
        same_book(&self.mode, book)
    }

    pub fn label_field(&self, field: LabelField) -> Option<&str> {
        match field {
            LabelField::Notes => self.notes.as_deref(),
            LabelField::Category => self.category.as_deref(),
            LabelField::VoucherType => self.voucher_type.as_deref(),
        }
    }

    /// Resolves the display label through [`LABEL_FALLBACK`].
    pub fn label(&self) -> &str {
        LABEL_FALLBACK
            .iter()
            .find_map(|field| {
                self.label_field(*field)
                    .filter(|value| !value.trim().is_empty())
            })
            .unwrap_or(tags::DEFAULT_CATEGORY)
    }

    /// Case-insensitive substring match on the counterparty name. An empty
    /// needle matches every payment.
    pub fn counterparty_matches(&self, needle: &str) -> bool {
        let needle = needle.trim();
        if needle.is_empty() {
            return true;
        }
        self.source_name
            .as_deref()
            .map(|name| name.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false)
    }
}
