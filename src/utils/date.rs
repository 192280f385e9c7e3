//! Date parsing helpers shared by the commands.

use crate::core::period::{Clock, last_day_of_month};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use chrono::{Datelike, NaiveDate};

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Optional date argument. An unparsable value is reported and ignored.
pub fn lenient_date(raw: Option<&str>, flag: &str) -> Option<NaiveDate> {
    let raw = raw?;
    match parse_date(raw) {
        Ok(d) => Some(d),
        Err(_) => {
            warning(format!("Ignoring invalid {flag} '{raw}'"));
            None
        }
    }
}

/// Reference date of a period lookup: the given date, or today when it is
/// missing or invalid.
pub fn reference_date(raw: Option<&str>, clock: &dyn Clock) -> NaiveDate {
    lenient_date(raw, "--date").unwrap_or_else(|| clock.today())
}

fn parse_year(s: &str) -> AppResult<i32> {
    s.parse::<i32>()
        .ok()
        .filter(|y| (1..=9999).contains(y))
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

fn parse_year_month(s: &str) -> AppResult<(i32, u32)> {
    let (y, m) = s
        .split_once('-')
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))?;
    let year = parse_year(y)?;
    let month = m
        .parse::<u32>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))?;
    Ok((year, month))
}

/// First and last day covered by a single range term.
fn term_bounds(term: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match term.len() {
        4 => {
            let y = parse_year(term)?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1)
                .ok_or_else(|| AppError::InvalidDate(term.to_string()))?;
            Ok((first, last_day_of_month(y, 12)))
        }
        7 => {
            let (y, m) = parse_year_month(term)?;
            let last = last_day_of_month(y, m);
            Ok((last.with_day(1).unwrap_or(last), last))
        }
        10 => {
            let d = parse_date(term)?;
            Ok((d, d))
        }
        _ => Err(AppError::InvalidDate(format!("unsupported range '{term}'"))),
    }
}

/// Parse a range expression.
///
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// - `start:end` where both sides share one of those shapes
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();
    match r.split_once(':') {
        Some((start, end)) => {
            let (start, end) = (start.trim(), end.trim());
            if start.len() != end.len() {
                return Err(AppError::InvalidDate(format!(
                    "start and end of '{r}' must have the same format"
                )));
            }
            let (from, _) = term_bounds(start)?;
            let (_, to) = term_bounds(end)?;
            if to < from {
                return Err(AppError::InvalidDate(format!("'{r}' ends before it starts")));
            }
            Ok((from, to))
        }
        None => term_bounds(r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn single_terms() {
        assert_eq!(parse_range("2024").unwrap(), (d("2024-01-01"), d("2024-12-31")));
        assert_eq!(parse_range("2024-02").unwrap(), (d("2024-02-01"), d("2024-02-29")));
        assert_eq!(parse_range("2024-03-04").unwrap(), (d("2024-03-04"), d("2024-03-04")));
    }

    #[test]
    fn intervals() {
        assert_eq!(
            parse_range("2024-01:2024-03").unwrap(),
            (d("2024-01-01"), d("2024-03-31"))
        );
        assert_eq!(
            parse_range("2024-03-01:2024-03-15").unwrap(),
            (d("2024-03-01"), d("2024-03-15"))
        );
    }

    #[test]
    fn invalid_ranges() {
        assert!(parse_range("2024-13").is_err());
        assert!(parse_range("2024:2024-03").is_err());
        assert!(parse_range("2024-03-15:2024-03-01").is_err());
        assert!(parse_range("yesterday").is_err());
    }

    #[test]
    fn invalid_reference_date_falls_back_to_today() {
        let clock = crate::core::period::FixedClock(d("2024-03-10"));
        assert_eq!(reference_date(Some("not-a-date"), &clock), d("2024-03-10"));
        assert_eq!(reference_date(None, &clock), d("2024-03-10"));
        assert_eq!(reference_date(Some("2024-01-20"), &clock), d("2024-01-20"));
    }

    #[test]
    fn dates_are_trimmed() {
        assert_eq!(parse_date(" 2024-03-04 ").unwrap(), d("2024-03-04"));
        assert!(matches!(parse_date("04/03/2024"), Err(AppError::InvalidDate(_))));
    }
}
