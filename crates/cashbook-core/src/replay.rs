//! Chronological replay shared by the book and business-unit ledgers.

use cashbook_domain::{AccountLedger, Direction, DirectionFilter, LedgerRow, Payment};
use rust_decimal::Decimal;

/// Orders payments ascending by date. The sort is stable, so payments sharing
/// a timestamp keep their insertion order.
pub(crate) fn chronological<'a>(payments: impl Iterator<Item = &'a Payment>) -> Vec<&'a Payment> {
    let mut ordered: Vec<&Payment> = payments.collect();
    ordered.sort_by_key(|payment| payment.date);
    ordered
}

/// Folds signed amounts over `ordered`, seeded by `opening`.
pub(crate) fn running_balances<'a>(opening: Decimal, ordered: &[&'a Payment]) -> Vec<LedgerRow<'a>> {
    ordered
        .iter()
        .scan(opening, |balance, payment| {
            *balance += payment.signed_amount();
            Some(LedgerRow {
                payment: *payment,
                running_balance: *balance,
            })
        })
        .collect()
}

/// Returns `(sum of IN amounts, sum of OUT amounts)`.
pub(crate) fn direction_totals<'a>(
    payments: impl IntoIterator<Item = &'a Payment>,
) -> (Decimal, Decimal) {
    payments
        .into_iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(inflow, outflow), payment| {
            match payment.direction {
                Direction::In => (inflow + payment.amount, outflow),
                Direction::Out => (inflow, outflow + payment.amount),
            }
        })
}

/// Replays `selected` in date order and applies the display filter last, so
/// filtered rows keep the balances of the full replay.
pub(crate) fn replay_ledger<'a>(
    key: &str,
    opening_balance: Decimal,
    selected: impl Iterator<Item = &'a Payment>,
    filter: DirectionFilter,
) -> AccountLedger<'a> {
    let ordered = chronological(selected);
    let replayed = running_balances(opening_balance, &ordered);
    let closing_balance = replayed
        .last()
        .map(|row| row.running_balance)
        .unwrap_or(opening_balance);
    let rows: Vec<LedgerRow<'a>> = replayed
        .into_iter()
        .filter(|row| filter.matches(row.payment.direction))
        .collect();
    let (total_in, total_out) = direction_totals(rows.iter().map(|row| row.payment));

    AccountLedger {
        book: key.to_string(),
        filter,
        opening_balance,
        closing_balance,
        rows,
        total_in,
        total_out,
    }
}
