use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeError {
    /// The entry breaks the double-entry sign rules and cannot be copied.
    #[error("Invalid fee entry {id}: {reason}")]
    InvalidEntry { id: String, reason: String },

    #[error("Fee amount is the sum of {entries} entries and can only be edited per entry")]
    ReadOnlyAmount { entries: usize },

    #[error("Fee entry moves {debit_currency} to {credit_currency}; its amount needs both sides")]
    CrossCurrencyEntry {
        debit_currency: String,
        credit_currency: String,
    },

    #[error("Fee entries sum to more than a decimal can hold ({entries} entries)")]
    AmountOverflow { entries: usize },
}
