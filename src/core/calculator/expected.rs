use crate::core::period::Period;
use chrono::{Datelike, NaiveDate, Weekday};

/// Hours an employee is expected to log on each weekday.
pub const HOURS_PER_WEEKDAY: u32 = 7;

/// Returns true for Monday–Friday, false for Saturday/Sunday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Number of Monday–Friday days in `start..=end`; 0 when `end < start`.
pub fn weekday_count(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_weekday(*d))
        .count() as u32
}

/// Expected = weekday_count * HOURS_PER_WEEKDAY
pub fn expected_hours(start: NaiveDate, end: NaiveDate) -> u32 {
    weekday_count(start, end) * HOURS_PER_WEEKDAY
}

pub fn expected_hours_for(period: &Period) -> u32 {
    expected_hours(period.start, period.end)
}
