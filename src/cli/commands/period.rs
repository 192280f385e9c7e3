use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::expected::{expected_hours_for, weekday_count};
use crate::core::period::Clock;
use crate::errors::AppResult;
use crate::ui::messages::{detail, header};
use crate::utils::date::reference_date;

/// Handle the `period` command
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Period {
        date,
        policy,
        offset,
    } = cmd
    {
        let kind = policy.unwrap_or(cfg.default_policy);
        let policy = kind.policy();
        let reference = reference_date(date.as_deref(), clock);
        let period = policy.shifted(reference, *offset);

        header(format!("{} period", policy.name()));
        detail("Reference date", reference);
        detail("Period", period);
        detail("Previous", policy.previous(period.start));
        detail("Next", policy.next(period.start));
        detail("Weekdays", weekday_count(period.start, period.end));
        detail("Expected hours", format!("{}h", expected_hours_for(&period)));
    }

    Ok(())
}
