//! Pay-period boundaries.
//!
//! Two period models are in use and they are kept as distinct strategies:
//! - `SemiMonthly`: 1st..15th and 16th..end of month.
//! - `RollingTwoWeek`: fourteen days starting on the Monday of the ISO week.
//!
//! Every `Period` is inclusive on both ends.

use chrono::{Datelike, Days, Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A contiguous range of calendar days, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Days in the period; 0 when `end < start`.
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Source of "today". Injected so every "current period" computation can be
/// pinned to a fixed date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// A pay-period model.
///
/// `next(previous(p).start) == p` and `previous(next(p).start) == p` hold for
/// every period `p` produced by the same policy.
///
/// Only `SemiMonthly` guarantees `current(d) == p` for every `d` in `p`.
/// `RollingTwoWeek` anchors on the Monday of the week containing `d`, so the
/// second week of a period opens a new one.
pub trait PeriodPolicy {
    /// Period containing `date`.
    fn current(&self, date: NaiveDate) -> Period;

    /// Period immediately before the one starting at `start`.
    fn previous(&self, start: NaiveDate) -> Period;

    /// Period immediately after the one starting at `start`.
    fn next(&self, start: NaiveDate) -> Period;

    fn name(&self) -> &'static str;

    /// Current period moved by `offset` cycles (negative = backwards).
    fn shifted(&self, date: NaiveDate, offset: i32) -> Period {
        let mut period = self.current(date);
        for _ in 0..offset.unsigned_abs() {
            period = if offset < 0 {
                self.previous(period.start)
            } else {
                self.next(period.start)
            };
        }
        period
    }
}

pub struct SemiMonthly;

impl SemiMonthly {
    fn first_half(year: i32, month: u32) -> Period {
        Period::new(ymd(year, month, 1), ymd(year, month, 15))
    }

    fn second_half(year: i32, month: u32) -> Period {
        Period::new(ymd(year, month, 16), last_day_of_month(year, month))
    }
}

impl PeriodPolicy for SemiMonthly {
    fn current(&self, date: NaiveDate) -> Period {
        if date.day() <= 15 {
            Self::first_half(date.year(), date.month())
        } else {
            Self::second_half(date.year(), date.month())
        }
    }

    fn previous(&self, start: NaiveDate) -> Period {
        if start.day() == 1 {
            let (year, month) = if start.month() == 1 {
                (start.year() - 1, 12)
            } else {
                (start.year(), start.month() - 1)
            };
            Self::second_half(year, month)
        } else {
            Self::first_half(start.year(), start.month())
        }
    }

    fn next(&self, start: NaiveDate) -> Period {
        if start.day() == 1 {
            Self::second_half(start.year(), start.month())
        } else {
            let (year, month) = if start.month() == 12 {
                (start.year() + 1, 1)
            } else {
                (start.year(), start.month() + 1)
            };
            Self::first_half(year, month)
        }
    }

    fn name(&self) -> &'static str {
        "semi-monthly"
    }
}

pub const ROLLING_PERIOD_DAYS: u64 = 14;

pub struct RollingTwoWeek;

impl RollingTwoWeek {
    fn starting_at(start: NaiveDate) -> Period {
        Period::new(start, add_days(start, ROLLING_PERIOD_DAYS - 1))
    }
}

impl PeriodPolicy for RollingTwoWeek {
    fn current(&self, date: NaiveDate) -> Period {
        let back = date.weekday().num_days_from_monday() as u64;
        Self::starting_at(sub_days(date, back))
    }

    fn previous(&self, start: NaiveDate) -> Period {
        Self::starting_at(sub_days(start, ROLLING_PERIOD_DAYS))
    }

    fn next(&self, start: NaiveDate) -> Period {
        Self::starting_at(add_days(start, ROLLING_PERIOD_DAYS))
    }

    fn name(&self) -> &'static str {
        "rolling-two-week"
    }
}

static SEMI_MONTHLY: SemiMonthly = SemiMonthly;
static ROLLING_TWO_WEEK: RollingTwoWeek = RollingTwoWeek;

/// Named selector for the two policies (CLI flag and config value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[default]
    SemiMonthly,
    RollingTwoWeek,
}

impl PolicyKind {
    pub fn policy(&self) -> &'static dyn PeriodPolicy {
        match self {
            PolicyKind::SemiMonthly => &SEMI_MONTHLY,
            PolicyKind::RollingTwoWeek => &ROLLING_TWO_WEEK,
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // year/month always come from an existing NaiveDate and day <= 16
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Last calendar day of the month (28, 29, 30 or 31).
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    ymd(next_year, next_month, 1)
        .pred_opt()
        .unwrap_or(NaiveDate::MIN)
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

fn sub_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}
