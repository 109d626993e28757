#![doc(test(attr(deny(warnings))))]

//! Cashbook derives per-book ledgers, category and business-unit views, and
//! period profit and loss plus balance sheet statements from a cash-basis
//! snapshot, and exposes them through a small shell.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("cashbook tracing initialized");
    });
}
