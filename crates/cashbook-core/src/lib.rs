//! cashbook-core
//!
//! Ledger derivation and financial statement services for cashbook.
//! Depends on cashbook-domain. No CLI, no terminal I/O, no direct storage
//! interactions; every service is a pure function over a borrowed snapshot.

pub mod account_ledger_service;
pub mod business_unit_service;
pub mod category_ledger_service;
pub mod classify;
pub mod error;
mod replay;
pub mod statement_service;
pub mod statistics_service;
pub mod storage;
pub mod time;

pub use account_ledger_service::*;
pub use business_unit_service::*;
pub use category_ledger_service::*;
pub use error::CoreError;
pub use statement_service::*;
pub use statistics_service::*;
pub use storage::{snapshot_warnings, SnapshotInfo, SnapshotSource};
pub use time::{Clock, FixedClock};

#[cfg(test)]
mod tests;
