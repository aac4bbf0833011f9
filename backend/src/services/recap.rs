//! Recap orchestration: fans the calculator out across employees, owns the
//! fetch-and-persist cycle, and exposes the payroll-facing summaries.

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::EngineError;
use crate::models::{AttendanceRecap, Period};
use crate::repositories::{
    AttendanceRecapRepositoryTrait, AttendanceRepositoryTrait, EmployeeRepositoryTrait,
    LeaveRepositoryTrait, PgAttendanceRecapRepository, PgAttendanceRepository,
    PgEmployeeRepository, PgLeaveRepository, PgShiftRepository, ShiftRepositoryTrait,
};
use crate::services::recap_calculator::{calculate, RecapInputs, RecapPolicy};

/// Per-employee result of a monthly batch run. The batch is best-effort:
/// one employee's failure never aborts the rest, so a mixed list is the
/// expected terminal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecapOutcome {
    Success {
        employee: String,
        recap: AttendanceRecap,
    },
    Error {
        employee: String,
        message: String,
    },
}

impl RecapOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RecapOutcome::Success { .. })
    }

    pub fn employee(&self) -> &str {
        match self {
            RecapOutcome::Success { employee, .. } | RecapOutcome::Error { employee, .. } => {
                employee
            }
        }
    }
}

/// Hour buckets payroll derives pay from. All figures come off the recap;
/// payroll never re-reads raw attendance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollHoursSummary {
    pub standard_hours: Decimal,
    pub overtime_hours: Decimal,
    pub leave_hours: Decimal,
    pub total_payable_hours: Decimal,
    pub attendance_rate: Decimal,
}

impl PayrollHoursSummary {
    pub fn from_recap(recap: &AttendanceRecap, hours_per_day: Decimal) -> Self {
        let standard_hours = Decimal::from(recap.total_days_present) * hours_per_day;
        let overtime_hours = recap.overtime_hours;
        let leave_hours = recap.total_leave_hours;
        PayrollHoursSummary {
            standard_hours,
            overtime_hours,
            leave_hours,
            total_payable_hours: standard_hours + overtime_hours + leave_hours,
            attendance_rate: recap.attendance_rate,
        }
    }
}

/// Aggregate reporting view over all recaps of one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecapStatistics {
    pub total_employees: usize,
    pub average_attendance_rate: Decimal,
    pub total_hours_worked: Decimal,
    pub total_overtime_hours: Decimal,
    pub total_leave_days: Decimal,
    pub employees_with_perfect_attendance: usize,
    pub employees_with_late_arrivals: usize,
    pub employees_with_early_departures: usize,
}

/// The recap capability payroll derivation depends on. Payroll receives
/// this instead of reaching into recap internals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecapProviderTrait: Send + Sync {
    /// Existing recap for the key, or a freshly generated one.
    async fn recap_for_payroll(
        &self,
        employee_id: i64,
        period: Period,
    ) -> Result<AttendanceRecap, EngineError>;
}

pub struct RecapService {
    pool: PgPool,
    employees: Arc<dyn EmployeeRepositoryTrait>,
    attendance: Arc<dyn AttendanceRepositoryTrait>,
    leaves: Arc<dyn LeaveRepositoryTrait>,
    shifts: Arc<dyn ShiftRepositoryTrait>,
    recaps: Arc<dyn AttendanceRecapRepositoryTrait>,
    policy: RecapPolicy,
}

impl RecapService {
    pub fn new(pool: PgPool, policy: RecapPolicy) -> Self {
        Self {
            pool,
            employees: Arc::new(PgEmployeeRepository::new()),
            attendance: Arc::new(PgAttendanceRepository::new()),
            leaves: Arc::new(PgLeaveRepository::new()),
            shifts: Arc::new(PgShiftRepository::new()),
            recaps: Arc::new(PgAttendanceRecapRepository::new()),
            policy,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_repositories(
        pool: PgPool,
        employees: Arc<dyn EmployeeRepositoryTrait>,
        attendance: Arc<dyn AttendanceRepositoryTrait>,
        leaves: Arc<dyn LeaveRepositoryTrait>,
        shifts: Arc<dyn ShiftRepositoryTrait>,
        recaps: Arc<dyn AttendanceRecapRepositoryTrait>,
        policy: RecapPolicy,
    ) -> Self {
        Self {
            pool,
            employees,
            attendance,
            leaves,
            shifts,
            recaps,
            policy,
        }
    }

    /// Fetch one employee's month of raw records and reduce them. Pure
    /// apart from the reads; nothing is persisted here.
    async fn compute(
        &self,
        employee_id: i64,
        period: Period,
    ) -> Result<crate::models::RecapCalculation, EngineError> {
        let from = period.first_day();
        let to = period.last_day();

        let attendances = self
            .attendance
            .find_by_employee_and_range(&self.pool, employee_id, from, to)
            .await?;
        let leaves = self
            .leaves
            .find_approved_overlapping(&self.pool, employee_id, from, to)
            .await?;

        let mut shift_ids: Vec<i64> = attendances.iter().filter_map(|att| att.shift_id).collect();
        shift_ids.sort_unstable();
        shift_ids.dedup();
        let shifts: HashMap<i64, _> = self
            .shifts
            .find_by_ids(&self.pool, shift_ids)
            .await?
            .into_iter()
            .map(|shift| (shift.id, shift))
            .collect();

        let inputs = RecapInputs {
            attendances: &attendances,
            shifts: &shifts,
            leaves: &leaves,
        };
        Ok(calculate(employee_id, period, &inputs, &self.policy))
    }

    async fn calculate_and_upsert(
        &self,
        employee_id: i64,
        period: Period,
    ) -> Result<AttendanceRecap, EngineError> {
        let calc = self.compute(employee_id, period).await?;
        self.recaps.upsert(&self.pool, &calc).await
    }

    /// Recap one employee, creating or replacing the stored row. Unknown
    /// ids fail with `EmployeeNotFound`; inactive employees are accepted so
    /// historical periods can still be recapped.
    pub async fn generate_for_employee(
        &self,
        employee_id: i64,
        period: Period,
    ) -> Result<AttendanceRecap, EngineError> {
        let employee = self
            .employees
            .find_by_id(&self.pool, employee_id)
            .await?
            .ok_or(EngineError::EmployeeNotFound(employee_id))?;
        self.calculate_and_upsert(employee.id, period).await
    }

    /// Recap every active employee for the period, recording per-employee
    /// failures inline and carrying on. Only the initial employee listing
    /// can fail the batch as a whole.
    pub async fn generate_monthly(
        &self,
        period: Period,
    ) -> Result<Vec<RecapOutcome>, EngineError> {
        let employees = self.employees.find_active(&self.pool).await?;
        tracing::info!(period = %period, employees = employees.len(), "generating monthly recaps");

        let mut outcomes = Vec::with_capacity(employees.len());
        for employee in employees {
            match self.calculate_and_upsert(employee.id, period).await {
                Ok(recap) => {
                    outcomes.push(RecapOutcome::Success {
                        employee: employee.full_name,
                        recap,
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        employee_id = employee.id,
                        period = %period,
                        error = %err,
                        "recap generation failed for employee"
                    );
                    outcomes.push(RecapOutcome::Error {
                        employee: employee.full_name,
                        message: err.to_string(),
                    });
                }
            }
        }
        Ok(outcomes)
    }

    /// Re-derives every existing recap for the period in place and returns
    /// how many were updated. Employees without a recap are not given one.
    pub async fn recalculate_monthly(&self, period: Period) -> Result<u64, EngineError> {
        let existing = self.recaps.find_by_period(&self.pool, period).await?;
        let mut updated = 0u64;
        for recap in existing {
            self.calculate_and_upsert(recap.employee_id, period).await?;
            updated += 1;
        }
        tracing::info!(period = %period, updated, "recalculated monthly recaps");
        Ok(updated)
    }

    async fn get_or_generate(
        &self,
        employee_id: i64,
        period: Period,
    ) -> Result<AttendanceRecap, EngineError> {
        if let Some(recap) = self
            .recaps
            .find_by_employee_and_period(&self.pool, employee_id, period)
            .await?
        {
            return Ok(recap);
        }
        self.generate_for_employee(employee_id, period).await
    }

    /// Hour buckets for payroll. Uses the stored recap when present,
    /// otherwise generates one first.
    pub async fn payroll_summary(
        &self,
        employee_id: i64,
        period: Period,
    ) -> Result<PayrollHoursSummary, EngineError> {
        let recap = self.get_or_generate(employee_id, period).await?;
        Ok(PayrollHoursSummary::from_recap(
            &recap,
            self.policy.hours_per_day,
        ))
    }

    /// Aggregate statistics across every recap stored for the period.
    pub async fn statistics(&self, period: Period) -> Result<RecapStatistics, EngineError> {
        let recaps = self.recaps.find_by_period(&self.pool, period).await?;
        let total_employees = recaps.len();

        let rate_sum: Decimal = recaps.iter().map(|r| r.attendance_rate).sum();
        let average_attendance_rate = if total_employees > 0 {
            (rate_sum / Decimal::from(total_employees as u64))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        } else {
            Decimal::ZERO
        };

        Ok(RecapStatistics {
            total_employees,
            average_attendance_rate,
            total_hours_worked: recaps.iter().map(|r| r.total_hours_worked).sum(),
            total_overtime_hours: recaps.iter().map(|r| r.overtime_hours).sum(),
            total_leave_days: recaps.iter().map(|r| r.total_days_leave).sum(),
            employees_with_perfect_attendance: recaps
                .iter()
                .filter(|r| r.attendance_rate == Decimal::from(100))
                .count(),
            employees_with_late_arrivals: recaps.iter().filter(|r| r.late_minutes > 0).count(),
            employees_with_early_departures: recaps
                .iter()
                .filter(|r| r.early_departure_minutes > 0)
                .count(),
        })
    }
}

#[async_trait]
impl RecapProviderTrait for RecapService {
    async fn recap_for_payroll(
        &self,
        employee_id: i64,
        period: Period,
    ) -> Result<AttendanceRecap, EngineError> {
        self.get_or_generate(employee_id, period).await
    }
}
