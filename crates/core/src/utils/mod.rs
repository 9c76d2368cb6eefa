pub mod time_utils;

pub use time_utils::{format_calendar_day, parse_calendar_day, CalendarDay};
