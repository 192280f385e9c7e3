use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::Auth;
use crate::core::metrics::{DashboardMetrics, MetricsLogic};
use crate::core::period::Clock;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{detail, header, success};
use crate::utils::table::{Column, Table};

/// Handle the `dashboard` command (GetDashboardMetrics).
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Dashboard { json } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let actor = Auth::actor(&pool, cfg.user.as_deref())?;

        let d = MetricsLogic::dashboard(&pool, &actor, clock)?;

        if *json {
            let out = serde_json::to_string_pretty(&d)
                .map_err(|e| AppError::Other(format!("JSON serialization error: {e}")))?;
            println!("{out}");
        } else {
            print_dashboard(&d);
        }
    }

    Ok(())
}

fn print_dashboard(d: &DashboardMetrics) {
    header(format!(
        "Dashboard {} → {}",
        d.current_period.start, d.current_period.end
    ));
    detail("Expected per employee", format!("{}h", d.current_period.expected_hours));
    detail("Employees", d.total_employees);
    detail("Complete timesheets", d.complete_timesheet_count);
    detail("Average per employee", format!("{}h", d.average_hours_per_employee));

    if d.incomplete_old_timesheets.is_empty() {
        println!();
        success("No incomplete timesheets in the older period.");
        return;
    }

    header("Incomplete older timesheets");
    let mut table = Table::new(vec![
        Column::left("Employee"),
        Column::left("Email"),
        Column::left("Period"),
        Column::right("Logged"),
        Column::right("Expected"),
    ]);
    for t in &d.incomplete_old_timesheets {
        table.add_row(vec![
            t.user_name.clone().unwrap_or_else(|| "-".into()),
            t.user_email.clone(),
            format!("{} → {}", t.period_start, t.period_end),
            format!("{}h", t.hours_logged),
            format!("{}h", t.expected_hours),
        ]);
    }
    print!("{}", table.render());
}
