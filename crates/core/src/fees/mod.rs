//! Fees module - fee line items of investment transactions and the allocator
//! that reconciles them with a single user entered fee amount.

mod fee_allocator;
mod fees_errors;
mod fees_model;
mod fees_traits;

#[cfg(test)]
mod fee_allocator_tests;

pub use fee_allocator::{FeeAllocator, FeeLoadIssue, FeeMode, FeeState};
pub use fees_errors::FeeError;
pub use fees_model::{FeeEntry, TransactionTag};
pub use fees_traits::FeeEntrySource;
