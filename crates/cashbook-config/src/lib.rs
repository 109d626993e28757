//! cashbook-config
//!
//! Persistent preferences: currency and locale, the bank books and business
//! units to report on, and the reconciliation tolerance.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{resolve_home, Config, HOME_ENV};
