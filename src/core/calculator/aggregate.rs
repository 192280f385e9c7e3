//! Roll-up of raw time entries into period metrics.
//!
//! All accumulators are keyed maps built in a single pass over the entry
//! snapshot.

use crate::core::calculator::completion::{self, CompletionRecord};
use crate::core::calculator::expected::{expected_hours_for, weekday_count};
use crate::core::period::Period;
use crate::models::charge_code::ChargeCode;
use crate::models::time_entry::TimeEntry;
use serde::Serialize;
use std::collections::HashMap;

/// Number of charge codes kept for the breakdown chart.
pub const TOP_CHARGE_CODES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeCodeHours {
    pub charge_code_id: i64,
    pub code: String,
    pub description: String,
    pub total_hours: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_employees: usize,
    pub complete_employees: usize,
    pub incomplete_employees: usize,
    pub completion_rate: u32,
    pub total_hours_logged: u32,
    pub average_hours_per_employee: u32,
}

/// Everything derived for one period.
#[derive(Debug, Clone)]
pub struct PeriodAggregate {
    pub period: Period,
    pub weekdays: u32,
    pub expected_hours: u32,
    pub hours_per_employee: HashMap<i64, u32>,
    pub hours_per_charge_code: Vec<ChargeCodeHours>,
    pub records: Vec<CompletionRecord>,
    pub summary: Summary,
}

impl PeriodAggregate {
    pub fn incomplete(&self) -> Vec<CompletionRecord> {
        completion::incomplete_worklist(&self.records)
    }

    pub fn top_charge_codes(&self, limit: usize) -> Vec<ChargeCodeHours> {
        self.hours_per_charge_code
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }
}

/// Sum of hours per employee. Employees without entries are absent.
pub fn hours_per_employee<'a, I>(entries: I) -> HashMap<i64, u32>
where
    I: IntoIterator<Item = &'a TimeEntry>,
{
    let mut totals: HashMap<i64, u32> = HashMap::new();
    for entry in entries {
        *totals.entry(entry.user_id).or_insert(0) += entry.hours;
    }
    totals
}

/// Sum of hours per charge code, highest total first (ties by code).
pub fn hours_per_charge_code<'a, I>(entries: I, charge_codes: &[ChargeCode]) -> Vec<ChargeCodeHours>
where
    I: IntoIterator<Item = &'a TimeEntry>,
{
    let by_id: HashMap<i64, &ChargeCode> = charge_codes.iter().map(|c| (c.id, c)).collect();

    let mut totals: HashMap<i64, ChargeCodeHours> = HashMap::new();
    for entry in entries {
        totals
            .entry(entry.charge_code_id)
            .or_insert_with(|| {
                let (code, description) = match by_id.get(&entry.charge_code_id) {
                    Some(c) => (c.code.clone(), c.description.clone()),
                    None => (format!("#{}", entry.charge_code_id), String::new()),
                };
                ChargeCodeHours {
                    charge_code_id: entry.charge_code_id,
                    code,
                    description,
                    total_hours: 0,
                }
            })
            .total_hours += entry.hours;
    }

    let mut out: Vec<ChargeCodeHours> = totals.into_values().collect();
    out.sort_by(|a, b| {
        b.total_hours
            .cmp(&a.total_hours)
            .then_with(|| a.code.cmp(&b.code))
    });
    out
}

/// Summary counts. Every zero denominator yields 0.
pub fn summarize(records: &[CompletionRecord], hours_per_employee: &HashMap<i64, u32>) -> Summary {
    let total_employees = records.len();
    let complete_employees = records.iter().filter(|r| r.is_complete).count();
    let total_hours_logged: u32 = hours_per_employee.values().sum();

    let average_hours_per_employee = if total_employees > 0 {
        (total_hours_logged as f64 / total_employees as f64).round() as u32
    } else {
        0
    };

    Summary {
        total_employees,
        complete_employees,
        incomplete_employees: total_employees - complete_employees,
        completion_rate: completion::rate(complete_employees, total_employees),
        total_hours_logged,
        average_hours_per_employee,
    }
}

/// Aggregate the entries falling inside `period` for the given roster.
pub fn aggregate(
    period: Period,
    entries: &[TimeEntry],
    employee_ids: &[i64],
    charge_codes: &[ChargeCode],
) -> PeriodAggregate {
    let in_period: Vec<&TimeEntry> = entries.iter().filter(|e| period.contains(e.date)).collect();

    let expected_hours = expected_hours_for(&period);
    let per_employee = hours_per_employee(in_period.iter().copied());
    let per_code = hours_per_charge_code(in_period.iter().copied(), charge_codes);
    let records = completion::classify(&per_employee, employee_ids, expected_hours);
    let summary = summarize(&records, &per_employee);

    PeriodAggregate {
        period,
        weekdays: weekday_count(period.start, period.end),
        expected_hours,
        hours_per_employee: per_employee,
        hours_per_charge_code: per_code,
        records,
        summary,
    }
}

/// Employees still below the baseline of an older period.
pub fn stale_incomplete_count(stale: &PeriodAggregate) -> usize {
    stale.records.iter().filter(|r| !r.is_complete).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(user_id: i64, charge_code_id: i64, date: &str, hours: u32) -> TimeEntry {
        TimeEntry {
            id: 0,
            user_id,
            charge_code_id,
            date: d(date),
            hours,
        }
    }

    fn code(id: i64, code: &str) -> ChargeCode {
        ChargeCode {
            id,
            code: code.to_string(),
            description: format!("{code} work"),
            is_active: true,
        }
    }

    /// Monday 2024-03-04 .. Sunday 2024-03-10: 35 expected hours.
    fn week() -> Period {
        Period::new(d("2024-03-04"), d("2024-03-10"))
    }

    fn full_week(user_id: i64, charge_code_id: i64) -> Vec<TimeEntry> {
        ["2024-03-04", "2024-03-05", "2024-03-06", "2024-03-07", "2024-03-08"]
            .iter()
            .map(|day| entry(user_id, charge_code_id, day, 7))
            .collect()
    }

    #[test]
    fn one_complete_one_incomplete() {
        let mut entries = full_week(1, 10);
        entries.extend([
            entry(2, 10, "2024-03-04", 7),
            entry(2, 11, "2024-03-05", 7),
            entry(2, 11, "2024-03-06", 6),
        ]);

        let agg = aggregate(week(), &entries, &[1, 2], &[code(10, "PROJ"), code(11, "ADMIN")]);

        assert_eq!(agg.expected_hours, 35);
        assert_eq!(agg.summary.total_employees, 2);
        assert_eq!(agg.summary.complete_employees, 1);
        assert_eq!(agg.summary.incomplete_employees, 1);
        assert_eq!(agg.summary.completion_rate, 50);
        assert_eq!(agg.summary.total_hours_logged, 55);
        assert_eq!(agg.summary.average_hours_per_employee, 28);

        let incomplete = agg.incomplete();
        assert_eq!(incomplete.len(), 1);
        assert_eq!(incomplete[0].employee_id, 2);
        assert_eq!(incomplete[0].completion_percentage, 57);

        assert_eq!(agg.hours_per_charge_code[0].code, "PROJ");
        assert_eq!(agg.hours_per_charge_code[0].total_hours, 42);
        assert_eq!(agg.hours_per_charge_code[1].code, "ADMIN");
        assert_eq!(agg.hours_per_charge_code[1].total_hours, 13);
    }

    #[test]
    fn empty_roster_reports_zeros() {
        let agg = aggregate(week(), &[], &[], &[]);
        assert_eq!(agg.summary, Summary::default());
        assert!(agg.incomplete().is_empty());
        assert_eq!(stale_incomplete_count(&agg), 0);
    }

    #[test]
    fn entries_outside_period_are_ignored() {
        let entries = vec![entry(1, 10, "2024-03-03", 7), entry(1, 10, "2024-03-11", 7)];
        let agg = aggregate(week(), &entries, &[1], &[code(10, "PROJ")]);
        assert_eq!(agg.summary.total_hours_logged, 0);
        assert!(agg.hours_per_charge_code.is_empty());
    }

    #[test]
    fn breakdown_is_truncated_to_top_codes() {
        let codes: Vec<ChargeCode> = (1..=12).map(|i| code(i, &format!("C{i:02}"))).collect();
        let entries: Vec<TimeEntry> = (1..=12)
            .map(|i| entry(1, i, "2024-03-04", (i % 7 + 1) as u32))
            .collect();

        let agg = aggregate(week(), &entries, &[1], &codes);
        assert_eq!(agg.hours_per_charge_code.len(), 12);

        let top = agg.top_charge_codes(TOP_CHARGE_CODES);
        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].total_hours >= w[1].total_hours));
    }

    #[test]
    fn unknown_charge_code_is_still_counted() {
        let agg = aggregate(week(), &[entry(1, 99, "2024-03-04", 3)], &[1], &[]);
        assert_eq!(agg.hours_per_charge_code[0].code, "#99");
        assert_eq!(agg.hours_per_charge_code[0].total_hours, 3);
    }

    #[test]
    fn stale_count_uses_the_older_period_baseline() {
        let entries = full_week(1, 10);
        let agg = aggregate(week(), &entries, &[1, 2, 3], &[code(10, "PROJ")]);
        assert_eq!(stale_incomplete_count(&agg), 2);
    }
}
