use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::Auth;
use crate::core::metrics::{AggregatedMetrics, MetricsLogic};
use crate::core::period::Clock;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{detail, header, success};
use crate::utils::colors::{color_for_severity, paint};
use crate::utils::date::lenient_date;
use crate::utils::table::{Column, Table};

/// Handle the `metrics` command (GetAggregatedMetrics).
pub fn handle(cmd: &Commands, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    if let Commands::Metrics { start, end, json } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let actor = Auth::actor(&pool, cfg.user.as_deref())?;

        let start = lenient_date(start.as_deref(), "--start");
        let end = lenient_date(end.as_deref(), "--end");

        let m = MetricsLogic::aggregated(
            &pool,
            &actor,
            clock,
            start,
            end,
            cfg.top_charge_codes,
        )?;

        if *json {
            let out = serde_json::to_string_pretty(&m)
                .map_err(|e| AppError::Other(format!("JSON serialization error: {e}")))?;
            println!("{out}");
        } else {
            print_report(&m);
        }
    }

    Ok(())
}

fn print_report(m: &AggregatedMetrics) {
    let s = &m.summary.counts;

    header(format!("Timesheet completion {} → {}", m.period.start, m.period.end));
    detail("Weekdays", m.period.weekdays);
    detail("Expected per employee", format!("{}h", m.period.expected_hours_per_employee));
    detail("Employees", s.total_employees);
    detail(
        "Complete",
        format!("{} ({}%)", s.complete_employees, s.completion_rate),
    );
    detail("Incomplete", s.incomplete_employees);
    detail("Hours logged", format!("{}h", s.total_hours_logged));
    detail("Average per employee", format!("{}h", s.average_hours_per_employee));
    detail(
        "Incomplete in older period",
        format!("{} ({})", m.summary.stale_incomplete_count, m.stale_period),
    );

    if !m.charge_code_breakdown.is_empty() {
        header("Hours per charge code");
        let mut table = Table::new(vec![
            Column::left("Code"),
            Column::left("Description"),
            Column::right("Hours"),
        ]);
        for c in &m.charge_code_breakdown {
            table.add_row(vec![
                c.code.clone(),
                c.description.clone(),
                format!("{}h", c.total_hours),
            ]);
        }
        print!("{}", table.render());
    }

    if m.incomplete_employees_list.is_empty() {
        println!();
        success("Every employee has completed the timesheet.");
        return;
    }

    header("Incomplete timesheets");
    let mut table = Table::new(vec![
        Column::left("Employee"),
        Column::left("Email"),
        Column::right("Logged"),
        Column::right("Expected"),
        Column::right("%"),
        Column::left("Severity"),
    ]);
    for e in &m.incomplete_employees_list {
        table.add_row(vec![
            e.name.clone().unwrap_or_else(|| "-".into()),
            e.email.clone(),
            format!("{}h", e.total_hours),
            format!("{}h", e.expected_hours),
            e.completion_percentage.to_string(),
            paint(color_for_severity(e.severity), e.severity.as_str()),
        ]);
    }
    print!("{}", table.render());
}
