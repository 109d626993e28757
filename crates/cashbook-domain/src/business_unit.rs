//! Per business-unit mini profit and loss shapes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct UnitTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
    /// `net / income * 100`, or zero when there is no income. Saturates at
    /// the decimal bounds when the ratio does not fit.
    pub margin: Decimal,
}

impl UnitTotals {
    pub fn from_parts(income: Decimal, expense: Decimal) -> Self {
        let net = income - expense;
        let margin = if income > Decimal::ZERO {
            net.checked_div(income)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(if net.is_sign_negative() {
                    Decimal::MIN
                } else {
                    Decimal::MAX
                })
        } else {
            Decimal::ZERO
        };
        Self {
            income,
            expense,
            net,
            margin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessUnitSummary {
    pub name: String,
    pub totals: UnitTotals,
    pub payment_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessUnitReport {
    pub units: Vec<BusinessUnitSummary>,
    pub grand_total: UnitTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_is_zero_without_income() {
        let totals = UnitTotals::from_parts(Decimal::ZERO, Decimal::from(100));
        assert_eq!(totals.net, Decimal::from(-100));
        assert_eq!(totals.margin, Decimal::ZERO);
    }

    #[test]
    fn margin_is_percentage_of_income() {
        let totals = UnitTotals::from_parts(Decimal::from(1000), Decimal::from(400));
        assert_eq!(totals.net, Decimal::from(600));
        assert_eq!(totals.margin, Decimal::from(60));
    }

    #[test]
    fn margin_saturates_when_ratio_overflows() {
        let totals = UnitTotals::from_parts(Decimal::new(1, 20), Decimal::from(100_000_000_000i64));
        assert!(totals.net.is_sign_negative());
        assert_eq!(totals.margin, Decimal::MIN);

        let totals = UnitTotals::from_parts(Decimal::new(1, 28), Decimal::ZERO);
        assert_eq!(totals.margin, Decimal::ONE_HUNDRED);
    }
}
