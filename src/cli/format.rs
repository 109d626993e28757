//! Amount, date and identifier rendering for shell output.

use cashbook_config::Config;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

/// Digit grouping convention for the integer part of an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// 1,234,567
    Thousands,
    /// 12,34,567
    Indian,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    pub currency: String,
    pub precision: u32,
    pub grouping: Grouping,
}

impl MoneyFormat {
    pub fn from_config(config: &Config) -> Self {
        let grouping = if config.locale.eq_ignore_ascii_case("en-IN") {
            Grouping::Indian
        } else {
            Grouping::Thousands
        };
        Self {
            currency: config.currency.clone(),
            precision: u32::from(config.currency_precision),
            grouping,
        }
    }

    /// Grouped amount without the currency code.
    pub fn amount(&self, value: Decimal) -> String {
        let rounded =
            value.round_dp_with_strategy(self.precision, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{:.*}", self.precision as usize, rounded.abs());
        let (int_part, frac_part) = match text.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (text.as_str(), None),
        };
        let mut out = String::new();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(&group_digits(int_part, self.grouping));
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }

    /// Amount prefixed with the currency code.
    pub fn money(&self, value: Decimal) -> String {
        format!("{} {}", self.currency, self.amount(value))
    }

    /// Amount or blank, for one-sided ledger columns.
    pub fn optional(&self, value: Option<Decimal>) -> String {
        value.map(|v| self.amount(v)).unwrap_or_default()
    }
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(len + len / 2);
    for (idx, ch) in chars.iter().enumerate() {
        let remaining = len - idx;
        let boundary = match grouping {
            Grouping::Thousands => remaining % 3 == 0,
            Grouping::Indian => remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0),
        };
        if idx > 0 && boundary {
            out.push(',');
        }
        out.push(*ch);
    }
    out
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// First eight hex digits of an id.
pub fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}

pub fn format_percent(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}
