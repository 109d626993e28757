use std::path::{Path, PathBuf};

use cashbook_domain::{same_book, InvoiceStatus, Snapshot, CASH_BOOK};
use rust_decimal::Decimal;
use tracing::warn;

use crate::CoreError;

/// Describes a persisted snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotInfo {
    pub name: String,
    pub path: PathBuf,
    pub payments: usize,
}

/// Abstraction over backends that materialize snapshots for the core.
pub trait SnapshotSource: Send + Sync {
    fn load_snapshot(&self, name: &str) -> Result<Snapshot, CoreError>;
    fn save_snapshot(&self, name: &str, snapshot: &Snapshot) -> Result<PathBuf, CoreError>;
    fn list_snapshots(&self) -> Result<Vec<SnapshotInfo>, CoreError>;
    fn load_snapshot_from_path(&self, path: &Path) -> Result<Snapshot, CoreError>;
    fn save_snapshot_to_path(&self, snapshot: &Snapshot, path: &Path) -> Result<(), CoreError>;
}

/// Detects upstream anomalies within a snapshot. `bank_books` lists the bank
/// books in use; the CASH book is always known.
pub fn snapshot_warnings<S: AsRef<str>>(snapshot: &Snapshot, bank_books: &[S]) -> Vec<String> {
    let known_books: Vec<&str> = bank_books
        .iter()
        .map(|book| book.as_ref())
        .chain(std::iter::once(CASH_BOOK))
        .collect();
    let mut warnings = Vec::new();

    for payment in &snapshot.payments {
        if payment.amount < Decimal::ZERO {
            warnings.push(format!(
                "payment {} has negative amount {}",
                payment.id, payment.amount
            ));
        }
        let book = payment.mode.trim();
        if book.is_empty() {
            warnings.push(format!("payment {} is not recorded against a book", payment.id));
        } else if !known_books.iter().any(|known| same_book(known, book)) {
            warnings.push(format!(
                "payment {} references unknown book {}",
                payment.id, book
            ));
        }
    }

    for supplier in &snapshot.suppliers {
        if supplier.outstanding < Decimal::ZERO {
            warnings.push(format!(
                "supplier {} has negative outstanding {}",
                supplier.name, supplier.outstanding
            ));
        }
    }

    for invoice in snapshot.invoices.iter().filter(|invoice| !invoice.is_void) {
        if invoice.balance > invoice.amount {
            warnings.push(format!(
                "invoice {} balance {} exceeds amount {}",
                invoice.id, invoice.balance, invoice.amount
            ));
        }
        if invoice.status == InvoiceStatus::Paid && !invoice.balance.is_zero() {
            warnings.push(format!(
                "invoice {} is paid but carries balance {}",
                invoice.id, invoice.balance
            ));
        }
    }

    if !warnings.is_empty() {
        warn!(count = warnings.len(), "snapshot audit found anomalies");
    }
    warnings
}

#[cfg(test)]
mod tests {
    use cashbook_domain::{Direction, Invoice, InvoiceKind, Payment, Supplier};
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn clean_snapshot_has_no_warnings() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let mut snapshot = Snapshot::default();
        snapshot.add_payment(Payment::new(Direction::In, Decimal::from(10), date, "CASH"));
        snapshot.add_payment(Payment::new(Direction::Out, Decimal::from(10), date, "CUB"));
        assert!(snapshot_warnings(&snapshot, &["CUB"]).is_empty());
    }

    #[test]
    fn configured_books_match_regardless_of_case() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let mut snapshot = Snapshot::default();
        snapshot.add_payment(Payment::new(Direction::In, Decimal::from(10), date, "cash"));
        snapshot.add_payment(Payment::new(Direction::In, Decimal::from(10), date, "acct-17"));
        assert!(snapshot_warnings(&snapshot, &["ACCT-17"]).is_empty());
    }

    #[test]
    fn reports_each_anomaly() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let mut snapshot = Snapshot::default();
        snapshot.add_payment(Payment::new(Direction::In, Decimal::from(-5), date, "CASH"));
        snapshot.add_payment(Payment::new(Direction::In, Decimal::from(5), date, " "));
        snapshot.add_payment(Payment::new(Direction::In, Decimal::from(5), date, "SBI"));
        let mut supplier = Supplier::new("Mill");
        supplier.outstanding = Decimal::from(-1);
        snapshot.add_supplier(supplier);
        snapshot.add_invoice(
            Invoice::new(InvoiceKind::Royalty, Direction::In, Decimal::from(10), date)
                .with_settlement(Decimal::from(20), InvoiceStatus::Partial),
        );
        snapshot.add_invoice(
            Invoice::new(InvoiceKind::Royalty, Direction::In, Decimal::from(10), date)
                .with_settlement(Decimal::from(3), InvoiceStatus::Paid),
        );

        let warnings = snapshot_warnings(&snapshot, &["CUB", "KVB"]);
        assert_eq!(warnings.len(), 6, "{warnings:#?}");
        assert!(warnings.iter().any(|w| w.contains("negative amount")));
        assert!(warnings.iter().any(|w| w.contains("not recorded against a book")));
        assert!(warnings.iter().any(|w| w.contains("unknown book SBI")));
        assert!(warnings.iter().any(|w| w.contains("supplier Mill")));
        assert!(warnings.iter().any(|w| w.contains("exceeds amount")));
        assert!(warnings.iter().any(|w| w.contains("is paid but carries")));
    }
}
