use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Anything that can be reduced to a pure calendar day.
///
/// Exchange rates are observed per day, so every date that enters the rate
/// history goes through this trait and loses its time-of-day component.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

/// Uses the local date of the instant in its own timezone.
impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

/// Format used when a calendar day crosses the persistence boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_calendar_day(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

pub fn format_calendar_day(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
