/// ANSI color helper utilities for terminal output.
use crate::core::calculator::completion::Severity;
use crate::core::calculator::day_status::DayStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub fn color_for_day_status(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Complete => GREEN,
        DayStatus::Partial => YELLOW,
        DayStatus::Empty => GREY,
    }
}

pub fn color_for_severity(severity: Severity) -> &'static str {
    match severity {
        Severity::NearComplete => GREEN,
        Severity::Moderate => YELLOW,
        Severity::Critical => RED,
    }
}

/// Green at 100% and above, red below.
pub fn color_for_completion(pct: u32) -> &'static str {
    if pct >= 100 { GREEN } else { RED }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}
