//! Per-employee completion for a period.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Derived completion state of one employee for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub employee_id: i64,
    pub total_hours: u32,
    pub expected_hours: u32,
    pub completion_percentage: u32,
    pub is_complete: bool,
}

/// "At least met": the employee logged the baseline or more.
pub fn is_at_least_met(total_hours: u32, expected_hours: u32) -> bool {
    total_hours >= expected_hours
}

/// "Exactly met": the stricter predicate used for calendar colouring.
pub fn is_exactly_met(total_hours: u32, expected_hours: u32) -> bool {
    total_hours == expected_hours
}

/// round(total / expected * 100), or 0 when nothing is expected.
pub fn completion_percentage(total_hours: u32, expected_hours: u32) -> u32 {
    if expected_hours == 0 {
        return 0;
    }
    (total_hours as f64 / expected_hours as f64 * 100.0).round() as u32
}

/// Integer ratio as a rounded percentage, 0 for an empty denominator.
pub fn rate(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Classify every employee of the roster. Employees missing from `totals`
/// have logged 0 hours.
pub fn classify(
    totals: &HashMap<i64, u32>,
    employee_ids: &[i64],
    expected_hours: u32,
) -> Vec<CompletionRecord> {
    employee_ids
        .iter()
        .map(|&id| {
            let total_hours = totals.get(&id).copied().unwrap_or(0);
            CompletionRecord {
                employee_id: id,
                total_hours,
                expected_hours,
                completion_percentage: completion_percentage(total_hours, expected_hours),
                is_complete: is_at_least_met(total_hours, expected_hours),
            }
        })
        .collect()
}

/// Incomplete records, worst first. Ties keep roster order.
pub fn incomplete_worklist(records: &[CompletionRecord]) -> Vec<CompletionRecord> {
    let mut out: Vec<CompletionRecord> = records
        .iter()
        .filter(|r| !r.is_complete)
        .cloned()
        .collect();
    out.sort_by_key(|r| r.completion_percentage);
    out
}

/// Display band for an incomplete employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    NearComplete,
    Moderate,
    Critical,
}

impl Severity {
    /// >= 75 near complete, 50..=74 moderate, < 50 critical.
    pub fn from_percentage(pct: u32) -> Self {
        if pct >= 75 {
            Severity::NearComplete
        } else if pct >= 50 {
            Severity::Moderate
        } else {
            Severity::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::NearComplete => "near complete",
            Severity::Moderate => "moderate",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_and_incomplete_employees() {
        let totals = HashMap::from([(1, 35), (2, 20)]);
        let records = classify(&totals, &[1, 2], 35);

        assert!(records[0].is_complete);
        assert_eq!(records[0].completion_percentage, 100);
        assert!(!records[1].is_complete);
        assert_eq!(records[1].completion_percentage, 57);

        let worklist = incomplete_worklist(&records);
        assert_eq!(worklist.len(), 1);
        assert_eq!(worklist[0].employee_id, 2);
    }

    #[test]
    fn missing_totals_count_as_zero() {
        let records = classify(&HashMap::new(), &[7], 70);
        assert_eq!(records[0].total_hours, 0);
        assert_eq!(records[0].completion_percentage, 0);
        assert!(!records[0].is_complete);
    }

    #[test]
    fn zero_expected_hours_is_complete_with_zero_percent() {
        let records = classify(&HashMap::new(), &[1], 0);
        assert!(records[0].is_complete);
        assert_eq!(records[0].completion_percentage, 0);
    }

    #[test]
    fn predicates_are_distinct() {
        assert!(is_at_least_met(8, 7));
        assert!(!is_exactly_met(8, 7));
        assert!(is_exactly_met(7, 7));
        assert!(!is_at_least_met(6, 7));
    }

    #[test]
    fn worklist_is_sorted_worst_first() {
        let totals = HashMap::from([(1, 60), (2, 10), (3, 40), (4, 70)]);
        let records = classify(&totals, &[1, 2, 3, 4], 70);
        let ids: Vec<i64> = incomplete_worklist(&records)
            .iter()
            .map(|r| r.employee_id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn severity_bands_are_inclusive_at_lower_bound() {
        assert_eq!(Severity::from_percentage(100), Severity::NearComplete);
        assert_eq!(Severity::from_percentage(75), Severity::NearComplete);
        assert_eq!(Severity::from_percentage(74), Severity::Moderate);
        assert_eq!(Severity::from_percentage(50), Severity::Moderate);
        assert_eq!(Severity::from_percentage(49), Severity::Critical);
        assert_eq!(Severity::from_percentage(0), Severity::Critical);
    }

    #[test]
    fn percentage_rounds_half_up() {
        // 1 / 8 = 12.5%
        assert_eq!(completion_percentage(1, 8), 13);
        assert_eq!(rate(1, 2), 50);
        assert_eq!(rate(0, 0), 0);
    }
}
