use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::Auth;
use crate::core::calculator::completion::{completion_percentage, is_at_least_met};
use crate::core::calculator::day_status::{DayStatus, hours_per_day};
use crate::core::calculator::expected::{expected_hours, is_weekday};
use crate::core::period::Clock;
use crate::db::pool::DbPool;
use crate::db::queries::{find_user_by_email, list_charge_codes, load_entries_between};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{detail, header, info};
use crate::utils::colors::{color_for_completion, color_for_day_status, paint};
use crate::utils::date::parse_range;
use crate::utils::formatting::{fmt_hours, fmt_progress};
use crate::utils::table::{Column, Table};
use std::collections::{BTreeMap, HashMap};

/// Handle the `list` command
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::List { period, user } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let actor = Auth::actor(&pool, cfg.user.as_deref())?;

        let owner = match user {
            Some(email) => find_user_by_email(&pool.conn, email)?
                .ok_or_else(|| AppError::UnknownUser(email.clone()))?,
            None => actor.clone(),
        };
        if owner.id != actor.id {
            Auth::require_admin(&actor)?;
        }

        let (start, end) = match period {
            Some(r) => parse_range(r)?,
            None => {
                let p = cfg.default_policy.policy().current(clock.today());
                (p.start, p.end)
            }
        };

        let entries = load_entries_between(&pool.conn, start, end, Some(owner.id))?;
        let codes: HashMap<i64, String> = list_charge_codes(&pool.conn, true)?
            .into_iter()
            .map(|c| (c.id, c.code))
            .collect();

        header(format!("Timesheet of {} ({} → {})", owner.display_name(), start, end));

        let mut per_day_codes: BTreeMap<_, Vec<String>> = BTreeMap::new();
        for e in &entries {
            let code = codes
                .get(&e.charge_code_id)
                .cloned()
                .unwrap_or_else(|| format!("#{}", e.charge_code_id));
            per_day_codes
                .entry(e.date)
                .or_default()
                .push(format!("{} {}", code, fmt_hours(e.hours)));
        }
        let per_day = hours_per_day(&entries);

        let mut table = Table::new(vec![
            Column::left("Date"),
            Column::left("Day"),
            Column::left("Entries"),
            Column::right("Total"),
            Column::left("Status"),
        ]);

        for day in start.iter_days().take_while(|d| *d <= end) {
            let total = per_day.get(&day).copied().unwrap_or(0);
            if total == 0 && !is_weekday(day) {
                continue;
            }

            let status = DayStatus::from_hours(total);
            table.add_row(vec![
                day.format("%Y-%m-%d").to_string(),
                day.format("%a").to_string(),
                per_day_codes
                    .get(&day)
                    .map(|v| v.join(", "))
                    .unwrap_or_else(|| "-".into()),
                fmt_hours(total),
                paint(color_for_day_status(status), status.as_str()),
            ]);
        }

        if table.rows.is_empty() {
            info("No weekdays or entries in the selected range.");
            return Ok(());
        }
        print!("{}", table.render());

        let logged: u32 = per_day.values().sum();
        let expected = expected_hours(start, end);
        let pct = completion_percentage(logged, expected);
        let state = if is_at_least_met(logged, expected) {
            "complete"
        } else {
            "incomplete"
        };

        println!();
        detail("Logged / expected", fmt_progress(logged, expected, pct));
        detail("Timesheet", paint(color_for_completion(pct), state));
    }

    Ok(())
}
