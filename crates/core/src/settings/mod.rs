//! Settings module - configuration of the ledger core.

mod settings_model;


pub use settings_model::{RatePrecision, Settings, SettingsUpdate};
