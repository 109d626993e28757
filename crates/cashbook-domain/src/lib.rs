//! cashbook-domain
//!
//! Pure domain models (Payment, Invoice, Customer, holdings, snapshots) and the
//! derived report shapes produced by the ledger and statement services.
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod balances;
pub mod business_unit;
pub mod common;
pub mod holdings;
pub mod invoice;
pub mod ledger;
pub mod party;
pub mod payment;
pub mod period;
pub mod snapshot;
pub mod statement;

pub use balances::*;
pub use business_unit::*;
pub use common::*;
pub use holdings::*;
pub use invoice::*;
pub use ledger::*;
pub use party::*;
pub use payment::*;
pub use period::*;
pub use snapshot::*;
pub use statement::*;

// Re-export common dependencies so consumers can rely on this crate as a façade.
pub use chrono;
pub use rust_decimal;
pub use uuid;
