//! Live statistics for the balance sheet, taken from the snapshot when the
//! upstream provided them and derived from the books otherwise.

use std::collections::BTreeMap;

use cashbook_domain::{Direction, LiveStatistics, Snapshot, CASH_BOOK};
use rust_decimal::Decimal;
use tracing::debug;

use crate::account_ledger_service::AccountLedgerService;

pub struct StatisticsService;

impl StatisticsService {
    /// Returns the snapshot's own statistics, or derives them from the books.
    pub fn resolve<S: AsRef<str>>(snapshot: &Snapshot, bank_books: &[S]) -> LiveStatistics {
        match &snapshot.statistics {
            Some(statistics) => statistics.clone(),
            None => Self::derive(snapshot, bank_books),
        }
    }

    /// Cash in hand is the CASH book closing balance, bank balances are the
    /// closing balances of `bank_books`, and receivables are the unpaid
    /// balances of inbound invoices.
    pub fn derive<S: AsRef<str>>(snapshot: &Snapshot, bank_books: &[S]) -> LiveStatistics {
        let cash_in_hand = AccountLedgerService::closing_balance(snapshot, CASH_BOOK);
        let bank_balances: BTreeMap<String, Decimal> = bank_books
            .iter()
            .map(|book| {
                let book = book.as_ref();
                (
                    book.to_string(),
                    AccountLedgerService::closing_balance(snapshot, book),
                )
            })
            .collect();
        let outstanding_receivables = snapshot
            .invoices
            .iter()
            .filter(|invoice| invoice.is_outstanding() && invoice.direction == Direction::In)
            .map(|invoice| invoice.balance)
            .sum();

        debug!(
            cash = %cash_in_hand,
            banks = bank_balances.len(),
            "statistics derived from books"
        );

        LiveStatistics {
            cash_in_hand,
            bank_balances,
            outstanding_receivables,
            advances_owed: Decimal::ZERO,
        }
    }
}
