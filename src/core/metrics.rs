//! Boundary queries over the period & completion engine.
//!
//! Both queries check the administrative capability first, then fetch a
//! snapshot from the `RecordStore` and hand it to the pure calculators.
//! Store failures propagate; no partial result is ever produced.

use crate::core::auth::Auth;
use crate::core::calculator::aggregate::{self, ChargeCodeHours, PeriodAggregate, Summary};
use crate::core::calculator::completion::Severity;
use crate::core::period::{Clock, Period, PeriodPolicy, PolicyKind};
use crate::errors::AppResult;
use crate::models::charge_code::ChargeCode;
use crate::models::time_entry::TimeEntry;
use crate::models::user::User;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Read side of the record store, queried by filters.
pub trait RecordStore {
    /// Users holding the EMPLOYEE role.
    fn employees(&self) -> AppResult<Vec<User>>;

    fn charge_codes(&self) -> AppResult<Vec<ChargeCode>>;

    /// Entries dated `start..=end`.
    fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<TimeEntry>>;
}

// ---------------------------
// GetAggregatedMetrics payload
// ---------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodInfo {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub weekdays: u32,
    pub expected_hours_per_employee: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedSummary {
    #[serde(flatten)]
    pub counts: Summary,
    pub stale_incomplete_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncompleteEmployee {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub total_hours: u32,
    pub expected_hours: u32,
    pub completion_percentage: u32,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMetrics {
    pub period: PeriodInfo,
    pub stale_period: Period,
    pub summary: AggregatedSummary,
    pub charge_code_breakdown: Vec<ChargeCodeHours>,
    pub incomplete_employees_list: Vec<IncompleteEmployee>,
}

// ---------------------------
// GetDashboardMetrics payload
// ---------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub expected_hours: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaleTimesheet {
    pub user_id: i64,
    pub user_email: String,
    pub user_name: Option<String>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub hours_logged: u32,
    pub expected_hours: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub complete_timesheet_count: usize,
    pub incomplete_old_timesheets: Vec<StaleTimesheet>,
    pub average_hours_per_employee: u32,
    pub total_employees: usize,
    pub current_period: CurrentPeriod,
}

/// Period two cycles before the one starting at `start`.
pub fn stale_period(policy: &dyn PeriodPolicy, start: NaiveDate) -> Period {
    policy.previous(policy.previous(start).start)
}

pub struct MetricsLogic;

impl MetricsLogic {
    /// GetAggregatedMetrics. Missing bounds default to the semi-monthly
    /// period containing today.
    pub fn aggregated<S: RecordStore + ?Sized>(
        store: &S,
        actor: &User,
        clock: &dyn Clock,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        top_charge_codes: usize,
    ) -> AppResult<AggregatedMetrics> {
        Auth::require_admin(actor)?;

        let policy = PolicyKind::SemiMonthly.policy();
        let default_period = policy.current(clock.today());
        let period = Period::new(
            start.unwrap_or(default_period.start),
            end.unwrap_or(default_period.end),
        );
        let stale = stale_period(policy, period.start);

        let employees = store.employees()?;
        let charge_codes = store.charge_codes()?;
        let current = load_aggregate(store, period, &employees, &charge_codes)?;
        let old = load_aggregate(store, stale, &employees, &charge_codes)?;

        let by_id: HashMap<i64, &User> = employees.iter().map(|e| (e.id, e)).collect();
        let incomplete_employees_list = current
            .incomplete()
            .into_iter()
            .filter_map(|r| {
                by_id.get(&r.employee_id).map(|emp| IncompleteEmployee {
                    id: emp.id,
                    name: emp.name.clone(),
                    email: emp.email.clone(),
                    total_hours: r.total_hours,
                    expected_hours: r.expected_hours,
                    completion_percentage: r.completion_percentage,
                    severity: Severity::from_percentage(r.completion_percentage),
                })
            })
            .collect();

        Ok(AggregatedMetrics {
            period: PeriodInfo {
                start: period.start,
                end: period.end,
                weekdays: current.weekdays,
                expected_hours_per_employee: current.expected_hours,
            },
            stale_period: stale,
            summary: AggregatedSummary {
                counts: current.summary.clone(),
                stale_incomplete_count: aggregate::stale_incomplete_count(&old),
            },
            charge_code_breakdown: current.top_charge_codes(top_charge_codes),
            incomplete_employees_list,
        })
    }

    /// GetDashboardMetrics, always anchored to today under the rolling
    /// two-week policy.
    pub fn dashboard<S: RecordStore + ?Sized>(
        store: &S,
        actor: &User,
        clock: &dyn Clock,
    ) -> AppResult<DashboardMetrics> {
        Auth::require_admin(actor)?;

        let policy = PolicyKind::RollingTwoWeek.policy();
        let period = policy.current(clock.today());
        let stale = stale_period(policy, period.start);

        let employees = store.employees()?;
        let charge_codes = store.charge_codes()?;
        let current = load_aggregate(store, period, &employees, &charge_codes)?;
        let old = load_aggregate(store, stale, &employees, &charge_codes)?;

        let incomplete_old_timesheets = employees
            .iter()
            .zip(old.records.iter())
            .filter(|(_, r)| !r.is_complete)
            .map(|(emp, r)| StaleTimesheet {
                user_id: emp.id,
                user_email: emp.email.clone(),
                user_name: emp.name.clone(),
                period_start: stale.start,
                period_end: stale.end,
                hours_logged: r.total_hours,
                expected_hours: r.expected_hours,
            })
            .collect();

        Ok(DashboardMetrics {
            complete_timesheet_count: current.summary.complete_employees,
            incomplete_old_timesheets,
            average_hours_per_employee: current.summary.average_hours_per_employee,
            total_employees: current.summary.total_employees,
            current_period: CurrentPeriod {
                start: period.start,
                end: period.end,
                expected_hours: current.expected_hours,
            },
        })
    }
}

fn load_aggregate<S: RecordStore + ?Sized>(
    store: &S,
    period: Period,
    employees: &[User],
    charge_codes: &[ChargeCode],
) -> AppResult<PeriodAggregate> {
    let entries = store.entries_between(period.start, period.end)?;
    let ids: Vec<i64> = employees.iter().map(|e| e.id).collect();
    Ok(aggregate::aggregate(period, &entries, &ids, charge_codes))
}
