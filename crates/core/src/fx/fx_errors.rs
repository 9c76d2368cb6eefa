use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FxError {
    #[error("Invalid currency pair: {0}")]
    InvalidCurrencyPair(String),

    #[error("No {pair} rate on or before {date}")]
    RateNotFound { pair: String, date: NaiveDate },

    #[error("Rate history for {found} cannot be merged into {expected}")]
    PairMismatch { expected: String, found: String },
}
