//! Calendar colouring of single days.

use crate::core::calculator::completion::is_exactly_met;
use crate::core::calculator::expected::HOURS_PER_WEEKDAY;
use crate::models::time_entry::TimeEntry;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Complete,
    Partial,
    Empty,
}

impl DayStatus {
    /// A day is complete only when exactly the daily quota was logged.
    pub fn from_hours(hours: u32) -> Self {
        if is_exactly_met(hours, HOURS_PER_WEEKDAY) {
            DayStatus::Complete
        } else if hours > 0 {
            DayStatus::Partial
        } else {
            DayStatus::Empty
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Complete => "complete",
            DayStatus::Partial => "partial",
            DayStatus::Empty => "empty",
        }
    }
}

/// Total hours per calendar day, in date order.
pub fn hours_per_day<'a, I>(entries: I) -> BTreeMap<NaiveDate, u32>
where
    I: IntoIterator<Item = &'a TimeEntry>,
{
    let mut days: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for entry in entries {
        *days.entry(entry.date).or_insert(0) += entry.hours;
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_seven_hours_is_complete() {
        assert_eq!(DayStatus::from_hours(7), DayStatus::Complete);
        assert_eq!(DayStatus::from_hours(3), DayStatus::Partial);
        assert_eq!(DayStatus::from_hours(0), DayStatus::Empty);
        // over the quota is not "exactly met"
        assert_eq!(DayStatus::from_hours(9), DayStatus::Partial);
    }

    #[test]
    fn hours_are_summed_per_day() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let entries = vec![
            TimeEntry { id: 1, user_id: 1, charge_code_id: 1, date: day, hours: 4 },
            TimeEntry { id: 2, user_id: 1, charge_code_id: 2, date: day, hours: 3 },
        ];
        let days = hours_per_day(&entries);
        assert_eq!(days.get(&day), Some(&7));
    }
}
