//! Ledger Core - exchange rate history and investment fee allocation.
//!
//! This crate holds the bookkeeping logic of a personal ledger that has to be
//! exact: one exchange rate per pair and calendar day, and the reconciliation
//! of a single fee amount with the fee entries stored for a transaction.
//! Storage and presentation are left to the host.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod fees;
pub mod fx;
pub mod settings;
pub mod tags;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
pub use errors::ValidationError;
