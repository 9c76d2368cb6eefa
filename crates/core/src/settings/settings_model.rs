//! Settings domain models.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BASE_CURRENCY;
use crate::fx::{CurrencyPair, FxError};
use crate::{errors::ValidationError, Error, Result};

/// What to do with an exchange rate that has more fractional digits than the
/// history stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatePrecision {
    /// Refuse the rate with an invalid argument error
    #[default]
    Reject,
    /// Round half-even to the stored scale
    Round,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub base_currency: String,
    #[serde(default)]
    pub rate_precision: RatePrecision,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            rate_precision: RatePrecision::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let code = self.base_currency.trim();
        if code.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "baseCurrency".to_string(),
            )));
        }
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::Validation(ValidationError::InvalidArgument(
                format!("'{}' is not a currency code", code),
            )));
        }
        Ok(())
    }

    /// Pair quoting `currency` in the base currency: EUR/USD for a USD base.
    pub fn base_pair(&self, currency: &str) -> std::result::Result<CurrencyPair, FxError> {
        CurrencyPair::new(currency, &self.base_currency)
    }

    /// Parses settings from JSON and validates them. Missing optional fields
    /// fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        settings.base_currency = settings.base_currency.trim().to_ascii_uppercase();
        Ok(settings)
    }

    /// Applies a partial update. The update is validated as a whole; on error
    /// the settings are left untouched.
    pub fn apply(&mut self, update: &SettingsUpdate) -> Result<()> {
        let mut updated = self.clone();
        if let Some(base_currency) = &update.base_currency {
            updated.base_currency = base_currency.trim().to_ascii_uppercase();
        }
        if let Some(rate_precision) = update.rate_precision {
            if rate_precision != self.rate_precision {
                warn!(
                    "Rate precision policy changed from {:?} to {:?}; existing histories keep their policy",
                    self.rate_precision, rate_precision
                );
            }
            updated.rate_precision = rate_precision;
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub base_currency: Option<String>,
    pub rate_precision: Option<RatePrecision>,
}
