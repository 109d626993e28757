//! Side-operation reporting: per-unit income, expense, net and margin.

use std::collections::BTreeSet;

use cashbook_domain::{
    AccountLedger, BusinessUnitReport, BusinessUnitSummary, DirectionFilter, Payment, UnitTotals,
};
use rust_decimal::Decimal;
use tracing::debug;

use crate::replay;

pub struct BusinessUnitService;

impl BusinessUnitService {
    /// Summarizes each named unit and the grand totals across them. Units
    /// without payments report zeros.
    pub fn summarize<S: AsRef<str>>(units: &[S], payments: &[Payment]) -> BusinessUnitReport {
        let summaries: Vec<BusinessUnitSummary> = units
            .iter()
            .map(|unit| Self::summarize_unit(unit.as_ref(), payments))
            .collect();

        let (income, expense) = summaries.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expense), summary| {
                (income + summary.totals.income, expense + summary.totals.expense)
            },
        );
        debug!(units = summaries.len(), "business units summarized");

        BusinessUnitReport {
            units: summaries,
            grand_total: UnitTotals::from_parts(income, expense),
        }
    }

    pub fn summarize_unit(unit: &str, payments: &[Payment]) -> BusinessUnitSummary {
        let tagged: Vec<&Payment> = Self::tagged(unit, payments).collect();
        let (income, expense) = replay::direction_totals(tagged.iter().copied());
        BusinessUnitSummary {
            name: unit.to_string(),
            totals: UnitTotals::from_parts(income, expense),
            payment_count: tagged.len(),
        }
    }

    /// Drill-down ledger for one unit: chronological, opening at zero.
    pub fn ledger<'a>(
        unit: &str,
        payments: &'a [Payment],
        filter: DirectionFilter,
    ) -> AccountLedger<'a> {
        replay::replay_ledger(unit, Decimal::ZERO, Self::tagged(unit, payments), filter)
    }

    /// Sorted distinct business-unit tags present on payments.
    pub fn distinct_units(payments: &[Payment]) -> Vec<String> {
        payments
            .iter()
            .filter_map(|payment| payment.business_unit.as_deref())
            .map(str::trim)
            .filter(|unit| !unit.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Payments whose tag names `unit`, ignoring surrounding whitespace.
    fn tagged<'a, 'u>(
        unit: &'u str,
        payments: &'a [Payment],
    ) -> impl Iterator<Item = &'a Payment> + 'u
    where
        'a: 'u,
    {
        let unit = unit.trim();
        payments
            .iter()
            .filter(move |payment| payment.business_unit.as_deref().map(str::trim) == Some(unit))
    }
}
