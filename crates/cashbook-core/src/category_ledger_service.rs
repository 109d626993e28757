//! Income and expense ledgers grouped by category, independent of book.

use std::collections::BTreeSet;

use cashbook_domain::{CategoryFilter, CategoryLedger, CategoryRow, CategoryView, Payment};
use rust_decimal::Decimal;
use tracing::debug;

use crate::classify;

pub struct CategoryLedgerService;

impl CategoryLedgerService {
    /// Builds the newest-first category ledger for `view`.
    ///
    /// Exclusions are applied first; the category list is taken at that
    /// point. The category filter and counterparty search then narrow the
    /// rows, whose running totals accumulate from the oldest shown row.
    pub fn build<'a>(
        view: CategoryView,
        filter: &CategoryFilter,
        search: &str,
        payments: &'a [Payment],
    ) -> CategoryLedger<'a> {
        let eligible: Vec<&Payment> = Self::eligible(view, payments).collect();
        let categories = Self::distinct_categories(eligible.iter().copied());

        let mut shown: Vec<&Payment> = eligible
            .into_iter()
            .filter(|payment| filter.matches(payment.category_or_default()))
            .filter(|payment| payment.counterparty_matches(search))
            .collect();
        shown.sort_by(|a, b| b.date.cmp(&a.date));

        let mut running = Decimal::ZERO;
        let mut rows: Vec<CategoryRow<'a>> = shown
            .iter()
            .rev()
            .map(|payment| {
                running += payment.amount;
                CategoryRow {
                    payment: *payment,
                    running_total: running,
                }
            })
            .collect();
        rows.reverse();

        debug!(
            view = %view,
            rows = rows.len(),
            total = %running,
            "category ledger built"
        );

        CategoryLedger {
            view,
            filter: filter.clone(),
            search: search.trim().to_string(),
            rows,
            grand_total: running,
            categories,
        }
    }

    /// Distinct categories of `view` after exclusions, sorted.
    pub fn categories(view: CategoryView, payments: &[Payment]) -> Vec<String> {
        Self::distinct_categories(Self::eligible(view, payments))
    }

    fn eligible(
        view: CategoryView,
        payments: &[Payment],
    ) -> impl Iterator<Item = &Payment> + '_ {
        let direction = view.direction();
        payments.iter().filter(move |payment| {
            payment.direction == direction
                && !classify::is_excluded(view, payment.category_or_default())
        })
    }

    fn distinct_categories<'a>(payments: impl Iterator<Item = &'a Payment>) -> Vec<String> {
        payments
            .map(|payment| payment.category_or_default().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use cashbook_domain::Direction;
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    fn day(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, day, 8, 30, 0).unwrap()
    }

    fn expense(amount: i64, on: u32, category: &str, party: &str) -> Payment {
        Payment::new(Direction::Out, Decimal::from(amount), day(on), "CASH")
            .with_category(category)
            .with_counterparty(party.to_lowercase(), party)
    }

    fn sample() -> Vec<Payment> {
        vec![
            expense(100, 1, "RENT", "Landlord"),
            expense(40, 3, "FUEL", "Indian Oil"),
            expense(999, 2, "CONTRA", "Self"),
            expense(500, 4, "LOAN_REPAYMENT", "Bank"),
            expense(300, 5, "INVESTMENT_GOLD", "Jeweller"),
            expense(60, 6, "FUEL", "HP Petrol"),
            Payment::new(Direction::In, Decimal::from(700), day(2), "CASH")
                .with_category("SALES"),
        ]
    }

    #[test]
    fn newest_row_carries_grand_total() {
        let payments = sample();
        let ledger = CategoryLedgerService::build(
            CategoryView::Expense,
            &CategoryFilter::All,
            "",
            &payments,
        );
        let amounts: Vec<_> = ledger.rows.iter().map(|row| row.payment.amount).collect();
        assert_eq!(
            amounts,
            vec![Decimal::from(60), Decimal::from(40), Decimal::from(100)]
        );
        let totals: Vec<_> = ledger.rows.iter().map(|row| row.running_total).collect();
        assert_eq!(
            totals,
            vec![Decimal::from(200), Decimal::from(140), Decimal::from(100)]
        );
        assert_eq!(ledger.grand_total, Decimal::from(200));
        assert_eq!(ledger.rows[0].running_total, ledger.grand_total);
        let oldest = ledger.rows.last().unwrap();
        assert_eq!(oldest.running_total, oldest.payment.amount);
    }

    #[test]
    fn category_filter_and_search_narrow_rows_but_not_category_list() {
        let payments = sample();
        let ledger = CategoryLedgerService::build(
            CategoryView::Expense,
            &CategoryFilter::parse("FUEL"),
            "petrol",
            &payments,
        );
        assert_eq!(ledger.rows.len(), 1);
        assert_eq!(ledger.grand_total, Decimal::from(60));
        assert_eq!(ledger.categories, vec!["FUEL".to_string(), "RENT".to_string()]);
    }

    #[test]
    fn income_view_only_sees_inflows() {
        let payments = sample();
        let ledger =
            CategoryLedgerService::build(CategoryView::Income, &CategoryFilter::All, "", &payments);
        assert_eq!(ledger.rows.len(), 1);
        assert_eq!(ledger.grand_total, Decimal::from(700));
        assert_eq!(
            CategoryLedgerService::categories(CategoryView::Income, &payments),
            vec!["SALES".to_string()]
        );
    }

    #[test]
    fn uncategorized_payments_group_as_other() {
        let payments = vec![Payment::new(Direction::Out, Decimal::from(5), day(1), "CASH")];
        let ledger = CategoryLedgerService::build(
            CategoryView::Expense,
            &CategoryFilter::parse("Other"),
            "",
            &payments,
        );
        assert_eq!(ledger.rows.len(), 1);
        assert_eq!(ledger.categories, vec!["Other".to_string()]);
    }

    #[test]
    fn empty_search_result_has_zero_total() {
        let payments = sample();
        let ledger = CategoryLedgerService::build(
            CategoryView::Expense,
            &CategoryFilter::All,
            "nobody",
            &payments,
        );
        assert!(ledger.is_empty());
        assert_eq!(ledger.grand_total, Decimal::ZERO);
    }
}
