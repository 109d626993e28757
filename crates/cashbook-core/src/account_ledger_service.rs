//! Per-book ledgers replayed from an opening balance.

use cashbook_domain::{AccountLedger, DirectionFilter, Payment, Snapshot};
use rust_decimal::Decimal;
use tracing::debug;

use crate::replay;

/// Builds running-balance ledgers for cash and bank books.
pub struct AccountLedgerService;

impl AccountLedgerService {
    /// Replays the payments recorded against `book`, seeded by
    /// `opening_balance`. Balances are computed over every payment in the
    /// book before `filter` narrows the display rows.
    pub fn build<'a>(
        book: &str,
        opening_balance: Decimal,
        payments: &'a [Payment],
        filter: DirectionFilter,
    ) -> AccountLedger<'a> {
        let ledger = replay::replay_ledger(
            book,
            opening_balance,
            payments.iter().filter(|payment| payment.is_in_book(book)),
            filter,
        );
        debug!(
            book,
            rows = ledger.rows.len(),
            closing = %ledger.closing_balance,
            "book ledger replayed"
        );
        ledger
    }

    /// Builds the ledger for `book` using the snapshot's opening balances.
    /// Books without a configured seed start from zero.
    pub fn for_snapshot<'a>(
        snapshot: &'a Snapshot,
        book: &str,
        filter: DirectionFilter,
    ) -> AccountLedger<'a> {
        let opening = snapshot
            .opening_balances
            .for_book(book)
            .unwrap_or_else(|| {
                debug!(book, "no opening balance for book, starting from zero");
                Decimal::ZERO
            });
        Self::build(book, opening, &snapshot.payments, filter)
    }

    /// Closing balance of `book` without materializing display rows.
    pub fn closing_balance(snapshot: &Snapshot, book: &str) -> Decimal {
        Self::for_snapshot(snapshot, book, DirectionFilter::All).closing_balance
    }
}

#[cfg(test)]
mod tests {
    use cashbook_domain::{Direction, OpeningBalances};
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    fn day(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, day, 10, 0, 0).unwrap()
    }

    fn cash(direction: Direction, amount: i64, on: u32) -> Payment {
        Payment::new(direction, Decimal::from(amount), day(on), "CASH")
    }

    #[test]
    fn cash_book_scenario_produces_expected_balances() {
        let payments = vec![cash(Direction::In, 500, 1), cash(Direction::Out, 200, 2)];
        let ledger = AccountLedgerService::build(
            "CASH",
            Decimal::from(1000),
            &payments,
            DirectionFilter::All,
        );
        assert_eq!(ledger.balances(), vec![Decimal::from(1500), Decimal::from(1300)]);
        assert_eq!(ledger.closing_balance, Decimal::from(1300));
        assert_eq!(ledger.total_in, Decimal::from(500));
        assert_eq!(ledger.total_out, Decimal::from(200));
    }

    #[test]
    fn replay_sorts_by_date_not_insertion() {
        let payments = vec![cash(Direction::Out, 200, 2), cash(Direction::In, 500, 1)];
        let ledger =
            AccountLedgerService::build("CASH", Decimal::from(1000), &payments, DirectionFilter::All);
        assert_eq!(ledger.balances(), vec![Decimal::from(1500), Decimal::from(1300)]);
    }

    #[test]
    fn filter_keeps_balances_from_full_replay() {
        let payments = vec![
            cash(Direction::In, 500, 1),
            cash(Direction::Out, 200, 2),
            cash(Direction::In, 50, 3),
            cash(Direction::Out, 25, 4),
        ];
        let full =
            AccountLedgerService::build("CASH", Decimal::from(1000), &payments, DirectionFilter::All);
        let outflows =
            AccountLedgerService::build("CASH", Decimal::from(1000), &payments, DirectionFilter::Out);

        assert_eq!(outflows.rows.len(), 2);
        for row in &outflows.rows {
            let matching = full
                .rows
                .iter()
                .find(|candidate| candidate.payment.id == row.payment.id)
                .expect("row present in full replay");
            assert_eq!(matching.running_balance, row.running_balance);
        }
        assert_eq!(outflows.balances(), vec![Decimal::from(1300), Decimal::from(1325)]);
        assert_eq!(outflows.closing_balance, full.closing_balance);
        assert_eq!(outflows.total_in, Decimal::ZERO);
        assert_eq!(outflows.total_out, Decimal::from(225));
    }

    #[test]
    fn closing_balance_matches_opening_plus_net_flow() {
        let payments: Vec<Payment> = (1..=20)
            .map(|idx| {
                let direction = if idx % 3 == 0 { Direction::Out } else { Direction::In };
                cash(direction, (idx * 37 % 200) as i64, (idx % 28 + 1) as u32)
            })
            .collect();
        let opening = Decimal::from(750);
        let ledger = AccountLedgerService::build("CASH", opening, &payments, DirectionFilter::In);

        let inflow: Decimal = payments
            .iter()
            .filter(|p| p.direction == Direction::In)
            .map(|p| p.amount)
            .sum();
        let outflow: Decimal = payments
            .iter()
            .filter(|p| p.direction == Direction::Out)
            .map(|p| p.amount)
            .sum();
        assert_eq!(ledger.closing_balance, opening + inflow - outflow);
    }

    #[test]
    fn other_books_are_ignored() {
        let payments = vec![
            cash(Direction::In, 500, 1),
            Payment::new(Direction::In, Decimal::from(900), day(1), "CUB"),
        ];
        let ledger =
            AccountLedgerService::build("CUB", Decimal::from(100), &payments, DirectionFilter::All);
        assert_eq!(ledger.rows.len(), 1);
        assert_eq!(ledger.closing_balance, Decimal::from(1000));
    }

    #[test]
    fn empty_book_closes_at_opening_balance() {
        let ledger =
            AccountLedgerService::build("KVB", Decimal::from(42), &[], DirectionFilter::All);
        assert!(ledger.is_empty());
        assert_eq!(ledger.opening_balance, Decimal::from(42));
        assert_eq!(ledger.closing_balance, Decimal::from(42));
    }

    #[test]
    fn snapshot_ledger_uses_configured_opening_balance() {
        let mut snapshot = Snapshot::new(OpeningBalances {
            cash: Decimal::from(1000),
            ..OpeningBalances::default()
        });
        snapshot.add_payment(cash(Direction::In, 500, 1));
        let ledger = AccountLedgerService::for_snapshot(&snapshot, "CASH", DirectionFilter::All);
        assert_eq!(ledger.closing_balance, Decimal::from(1500));

        let unseeded = AccountLedgerService::closing_balance(&snapshot, "SBI");
        assert_eq!(unseeded, Decimal::ZERO);
    }

    #[test]
    fn book_id_case_does_not_split_seed_from_payments() {
        let mut snapshot = Snapshot::new(OpeningBalances {
            cash: Decimal::from(1000),
            ..OpeningBalances::default()
        });
        snapshot.add_payment(cash(Direction::In, 500, 1));
        let ledger = AccountLedgerService::for_snapshot(&snapshot, "cash", DirectionFilter::All);
        assert_eq!(ledger.opening_balance, Decimal::from(1000));
        assert_eq!(ledger.rows.len(), 1);
        assert_eq!(ledger.closing_balance, Decimal::from(1500));
    }

    #[test]
    fn lowercase_bank_ids_replay_from_zero() {
        let mut snapshot = Snapshot::default();
        snapshot.add_payment(Payment::new(Direction::In, Decimal::from(250), day(3), "acct-17"));
        let ledger = AccountLedgerService::for_snapshot(&snapshot, "ACCT-17", DirectionFilter::All);
        assert_eq!(ledger.rows.len(), 1);
        assert_eq!(ledger.closing_balance, Decimal::from(250));
    }
}
