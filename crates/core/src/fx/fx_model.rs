use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::fx_errors::FxError;
use crate::constants::RATE_SCALE;
use crate::settings::RatePrecision;
use crate::utils::time_utils::{format_calendar_day, parse_calendar_day, CalendarDay};
use crate::{Error, Result};

/// Brings a rate to exactly `RATE_SCALE` fractional digits.
///
/// Under `RatePrecision::Reject` a rate that carries significant digits past
/// the scale is an invalid argument. Under `RatePrecision::Round` it is rounded
/// half-even. The sign is never touched.
pub fn normalize_rate(rate: Decimal, precision: RatePrecision) -> Result<Decimal> {
    let rounded = rate.round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointNearestEven);
    if rounded != rate && precision == RatePrecision::Reject {
        return Err(Error::invalid_argument(format!(
            "Rate {} has more than {} fractional digits",
            rate, RATE_SCALE
        )));
    }

    let mut normalized = rounded;
    normalized.rescale(RATE_SCALE);
    if normalized.scale() != RATE_SCALE {
        return Err(Error::invalid_argument(format!(
            "Rate {} is too large to be stored with {} fractional digits",
            rate, RATE_SCALE
        )));
    }

    Ok(normalized)
}

/// An ordered pair of currency codes, e.g. EUR/USD.
///
/// A rate of `r` means one unit of `base` costs `r` units of `quote`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: &str, quote: &str) -> std::result::Result<Self, FxError> {
        let base = normalize_currency_code(base)?;
        let quote = normalize_currency_code(quote)?;
        if base == quote {
            return Err(FxError::InvalidCurrencyPair(format!(
                "{}/{}: base and quote are the same",
                base, quote
            )));
        }
        Ok(Self { base, quote })
    }

    /// Lookup key of the pair: "EUR/USD".
    pub fn key(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }

    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
        }
    }
}

fn normalize_currency_code(code: &str) -> std::result::Result<String, FxError> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FxError::InvalidCurrencyPair(format!(
            "'{}' is not a currency code",
            code
        )));
    }
    Ok(code.to_ascii_uppercase())
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Parses "EUR/USD", "EUR:USD" or "EURUSD".
impl FromStr for CurrencyPair {
    type Err = FxError;

    fn from_str(key: &str) -> std::result::Result<Self, Self::Err> {
        let key = key.trim();
        if let Some((base, quote)) = key.split_once('/').or_else(|| key.split_once(':')) {
            return CurrencyPair::new(base, quote);
        }
        if key.len() == 6 && key.is_ascii() {
            return CurrencyPair::new(&key[..3], &key[3..]);
        }
        Err(FxError::InvalidCurrencyPair(key.to_string()))
    }
}

/// An exchange rate observed on a calendar day.
///
/// Observations are immutable. Equality, hashing and ordering look at the date
/// only, so a collection of observations holds at most one rate per day and a
/// newer observation for the same day replaces the older one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RateObservationRecord", into = "RateObservationRecord")]
pub struct RateObservation {
    date: NaiveDate,
    rate: Decimal,
}

impl RateObservation {
    /// Creates an observation, truncating `date` to its calendar day and
    /// rejecting rates with more than `RATE_SCALE` fractional digits.
    pub fn new(date: impl CalendarDay, rate: Decimal) -> Result<Self> {
        Self::with_precision(date, rate, RatePrecision::Reject)
    }

    pub fn with_precision(
        date: impl CalendarDay,
        rate: Decimal,
        precision: RatePrecision,
    ) -> Result<Self> {
        Ok(Self {
            date: date.calendar_day(),
            rate: normalize_rate(rate, precision)?,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Persistence form of the observation. `id` is the storage layer's
    /// surrogate key, if it has one.
    pub fn to_record(&self, id: Option<String>) -> RateObservationRecord {
        RateObservationRecord {
            id,
            date: Some(format_calendar_day(self.date)),
            rate: Some(self.rate.to_string()),
        }
    }
}

impl PartialEq for RateObservation {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
    }
}

impl Eq for RateObservation {}

impl Hash for RateObservation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.date.hash(state);
    }
}

impl PartialOrd for RateObservation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RateObservation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

// Eq, Ord and Hash all delegate to the date, which makes this borrow sound.
impl Borrow<NaiveDate> for RateObservation {
    fn borrow(&self) -> &NaiveDate {
        &self.date
    }
}

/// A rate observation as the storage layer sees it.
///
/// Every field is optional because the record may come from a partially
/// written row. The calendar date is rebuilt from `date` when the record is
/// loaded; nothing else about the date is stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateObservationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub rate: Option<String>,
}

impl RateObservationRecord {
    /// Loads the record, applying `precision` to the stored rate.
    pub fn load(&self, precision: RatePrecision) -> Result<RateObservation> {
        let date = self
            .date
            .as_deref()
            .ok_or_else(|| Error::invalid_argument("Rate observation has no date"))?;
        let rate = self
            .rate
            .as_deref()
            .ok_or_else(|| Error::invalid_argument("Rate observation has no rate"))?;

        let date = parse_calendar_day(date)?;
        let rate = Decimal::from_str(rate.trim())?;
        RateObservation::with_precision(date, rate, precision)
    }
}

impl TryFrom<RateObservationRecord> for RateObservation {
    type Error = Error;

    fn try_from(record: RateObservationRecord) -> Result<Self> {
        record.load(RatePrecision::Reject)
    }
}

impl From<RateObservation> for RateObservationRecord {
    fn from(observation: RateObservation) -> Self {
        observation.to_record(None)
    }
}
