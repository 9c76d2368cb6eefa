//! Accounts module - the account context fee entries are measured against.

mod accounts_model;


// Re-export the public interface
pub use accounts_model::Account;
