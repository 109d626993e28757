//! Exclusion rules that keep internal transfers, debt principal and asset
//! purchases out of income and expense figures.

use cashbook_domain::{
    tags::{CHIT_SAVINGS, CONTRA, INVESTMENT_PREFIX, LOAN_REPAYMENT},
    CategoryView,
};

/// Categories excluded from both income and expense views.
const SHARED_EXCLUSIONS: &[&str] = &[CONTRA];
/// Additional categories excluded from expense views only.
const EXPENSE_EXCLUSIONS: &[&str] = &[LOAN_REPAYMENT, CHIT_SAVINGS];

/// True when payments in `category` must not count toward `view`.
pub fn is_excluded(view: CategoryView, category: &str) -> bool {
    if category.starts_with(INVESTMENT_PREFIX) || SHARED_EXCLUSIONS.contains(&category) {
        return true;
    }
    match view {
        CategoryView::Expense => EXPENSE_EXCLUSIONS.contains(&category),
        CategoryView::Income => false,
    }
}
