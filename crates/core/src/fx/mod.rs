//! FX (Foreign Exchange) module - rate observations and per-pair histories.

mod fx_errors;
mod fx_model;
mod rate_history;


pub use fx_errors::FxError;
pub use fx_model::{normalize_rate, CurrencyPair, RateObservation, RateObservationRecord};
pub use rate_history::{RateHistory, RateHistoryRecord};
