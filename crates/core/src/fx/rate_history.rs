use std::collections::btree_set::{self, BTreeSet};

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fx_errors::FxError;
use super::fx_model::{CurrencyPair, RateObservation, RateObservationRecord};
use crate::settings::{RatePrecision, Settings};
use crate::utils::time_utils::CalendarDay;
use crate::{Error, Result};

/// Day-by-day exchange rate history of one currency pair.
///
/// Observations are kept in a `BTreeSet` ordered by date. Because an
/// observation's identity is its date, the set holds at most one rate per day
/// and lookups by date are logarithmic.
///
/// The history has no interior locking. Hosts that mutate it while other
/// threads read it should wrap it in `Arc<RwLock<RateHistory>>`.
///
/// Serialized histories go through `RateHistoryRecord`, so loading one applies
/// its own precision policy and lets a later record for a day replace an
/// earlier one, exactly as `insert` does.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RateHistoryRecord", into = "RateHistoryRecord")]
pub struct RateHistory {
    pair: CurrencyPair,
    precision: RatePrecision,
    observations: BTreeSet<RateObservation>,
}

/// Serialized form of a `RateHistory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateHistoryRecord {
    pub pair: CurrencyPair,
    #[serde(default)]
    pub precision: RatePrecision,
    #[serde(default)]
    pub observations: Vec<RateObservationRecord>,
}

impl RateHistory {
    pub fn new(pair: CurrencyPair) -> Self {
        Self::with_precision(pair, RatePrecision::default())
    }

    pub fn with_precision(pair: CurrencyPair, precision: RatePrecision) -> Self {
        Self {
            pair,
            precision,
            observations: BTreeSet::new(),
        }
    }

    pub fn with_settings(pair: CurrencyPair, settings: &Settings) -> Self {
        Self::with_precision(pair, settings.rate_precision)
    }

    /// History of `currency` quoted in the settings' base currency, using the
    /// settings' precision policy.
    pub fn for_currency(
        currency: &str,
        settings: &Settings,
    ) -> std::result::Result<Self, FxError> {
        Ok(Self::with_settings(settings.base_pair(currency)?, settings))
    }

    /// Rebuilds a history from storage records. The first malformed record
    /// aborts the load.
    pub fn from_records<I>(pair: CurrencyPair, precision: RatePrecision, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RateObservationRecord>,
    {
        let mut history = Self::with_precision(pair, precision);
        for record in records {
            history.insert_record(&record)?;
        }
        Ok(history)
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn precision(&self) -> RatePrecision {
        self.precision
    }

    /// Stores `rate` for the calendar day of `date`.
    ///
    /// Returns the observation that was replaced if the day already had one.
    pub fn insert(
        &mut self,
        date: impl CalendarDay,
        rate: Decimal,
    ) -> Result<Option<RateObservation>> {
        let observation = RateObservation::with_precision(date, rate, self.precision)?;
        Ok(self.insert_observation(observation))
    }

    /// Inserts a record coming from storage; an absent date or rate is an
    /// invalid argument.
    pub fn insert_record(
        &mut self,
        record: &RateObservationRecord,
    ) -> Result<Option<RateObservation>> {
        let observation = record.load(self.precision)?;
        Ok(self.insert_observation(observation))
    }

    pub fn insert_observation(&mut self, observation: RateObservation) -> Option<RateObservation> {
        let replaced = self.observations.replace(observation);
        if let Some(previous) = &replaced {
            debug!(
                "Replaced {} rate for {}: {} -> {}",
                self.pair,
                observation.date(),
                previous.rate(),
                observation.rate()
            );
        }
        replaced
    }

    /// Copies every observation of `other` into this history, `other` winning
    /// on shared days.
    pub fn merge(&mut self, other: &RateHistory) -> std::result::Result<usize, FxError> {
        if other.pair != self.pair {
            return Err(FxError::PairMismatch {
                expected: self.pair.key(),
                found: other.pair.key(),
            });
        }
        for observation in &other.observations {
            self.insert_observation(*observation);
        }
        Ok(other.observations.len())
    }

    /// Most recent observation dated on or before `date`.
    pub fn rate_on_or_before(&self, date: impl CalendarDay) -> Option<&RateObservation> {
        let day = date.calendar_day();
        self.observations.range(..=day).next_back()
    }

    /// Like `rate_on_or_before`, but a missing rate is an error.
    pub fn require_rate_on_or_before(
        &self,
        date: impl CalendarDay,
    ) -> std::result::Result<&RateObservation, FxError> {
        let day = date.calendar_day();
        self.rate_on_or_before(day)
            .ok_or_else(|| FxError::RateNotFound {
                pair: self.pair.key(),
                date: day,
            })
    }

    /// Observation recorded for exactly this day.
    pub fn get(&self, date: impl CalendarDay) -> Option<&RateObservation> {
        self.observations.get(&date.calendar_day())
    }

    pub fn remove(&mut self, date: impl CalendarDay) -> Option<RateObservation> {
        self.observations.take(&date.calendar_day())
    }

    pub fn first(&self) -> Option<&RateObservation> {
        self.observations.first()
    }

    pub fn latest(&self) -> Option<&RateObservation> {
        self.observations.last()
    }

    /// Observations in chronological order.
    pub fn iter(&self) -> btree_set::Iter<'_, RateObservation> {
        self.observations.iter()
    }

    /// Observations dated within `start..=end`. An inverted range is empty.
    pub fn range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &RateObservation> + '_ {
        let upper = end.max(start);
        self.observations
            .range(start..=upper)
            .filter(move |observation| observation.date() <= end)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn to_records(&self) -> Vec<RateObservationRecord> {
        self.observations
            .iter()
            .map(|observation| observation.to_record(None))
            .collect()
    }
}

impl TryFrom<RateHistoryRecord> for RateHistory {
    type Error = Error;

    fn try_from(record: RateHistoryRecord) -> Result<Self> {
        Self::from_records(record.pair, record.precision, record.observations)
    }
}

impl From<RateHistory> for RateHistoryRecord {
    fn from(history: RateHistory) -> Self {
        Self {
            observations: history.to_records(),
            pair: history.pair,
            precision: history.precision,
        }
    }
}

impl<'a> IntoIterator for &'a RateHistory {
    type Item = &'a RateObservation;
    type IntoIter = btree_set::Iter<'a, RateObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
