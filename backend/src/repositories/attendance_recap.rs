use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::error::EngineError;
use crate::models::{AttendanceRecap, Period, RecapCalculation};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRecapRepositoryTrait: Send + Sync {
    /// Atomic create-or-replace keyed on (employee_id, year, month). The
    /// unique index serialises concurrent writers to the same key;
    /// last-writer-wins.
    async fn upsert(
        &self,
        db: &PgPool,
        calc: &RecapCalculation,
    ) -> Result<AttendanceRecap, EngineError>;

    async fn find_by_employee_and_period(
        &self,
        db: &PgPool,
        employee_id: i64,
        period: Period,
    ) -> Result<Option<AttendanceRecap>, EngineError>;

    /// All recaps for a period, across employees.
    async fn find_by_period(
        &self,
        db: &PgPool,
        period: Period,
    ) -> Result<Vec<AttendanceRecap>, EngineError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PgAttendanceRecapRepository;

impl PgAttendanceRecapRepository {
    pub fn new() -> Self {
        Self
    }
}

const SELECT_COLUMNS: &str = "id, employee_id, year, month, total_days_present, \
     total_hours_worked, total_days_absent, total_days_leave, total_leave_hours, \
     overtime_hours, late_minutes, early_departure_minutes, working_days_in_month, \
     attendance_rate, status, notes, created_at, updated_at";

#[async_trait]
impl AttendanceRecapRepositoryTrait for PgAttendanceRecapRepository {
    async fn upsert(
        &self,
        db: &PgPool,
        calc: &RecapCalculation,
    ) -> Result<AttendanceRecap, EngineError> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO attendance_recaps (employee_id, year, month, total_days_present, \
             total_hours_worked, total_days_absent, total_days_leave, total_leave_hours, \
             overtime_hours, late_minutes, early_departure_minutes, working_days_in_month, \
             attendance_rate, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15) \
             ON CONFLICT (employee_id, year, month) DO UPDATE SET \
             total_days_present = EXCLUDED.total_days_present, \
             total_hours_worked = EXCLUDED.total_hours_worked, \
             total_days_absent = EXCLUDED.total_days_absent, \
             total_days_leave = EXCLUDED.total_days_leave, \
             total_leave_hours = EXCLUDED.total_leave_hours, \
             overtime_hours = EXCLUDED.overtime_hours, \
             late_minutes = EXCLUDED.late_minutes, \
             early_departure_minutes = EXCLUDED.early_departure_minutes, \
             working_days_in_month = EXCLUDED.working_days_in_month, \
             attendance_rate = EXCLUDED.attendance_rate, \
             status = EXCLUDED.status, \
             updated_at = EXCLUDED.updated_at \
             RETURNING {}",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, AttendanceRecap>(&query)
            .bind(calc.employee_id)
            .bind(calc.period.year())
            .bind(calc.period.month() as i32)
            .bind(calc.total_days_present)
            .bind(calc.total_hours_worked)
            .bind(calc.total_days_absent)
            .bind(calc.total_days_leave)
            .bind(calc.total_leave_hours)
            .bind(calc.overtime_hours)
            .bind(calc.late_minutes)
            .bind(calc.early_departure_minutes)
            .bind(calc.working_days_in_month)
            .bind(calc.attendance_rate)
            .bind(calc.status)
            .bind(now)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn find_by_employee_and_period(
        &self,
        db: &PgPool,
        employee_id: i64,
        period: Period,
    ) -> Result<Option<AttendanceRecap>, EngineError> {
        let query = format!(
            "SELECT {} FROM attendance_recaps WHERE employee_id = $1 AND year = $2 AND month = $3",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, AttendanceRecap>(&query)
            .bind(employee_id)
            .bind(period.year())
            .bind(period.month() as i32)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn find_by_period(
        &self,
        db: &PgPool,
        period: Period,
    ) -> Result<Vec<AttendanceRecap>, EngineError> {
        let query = format!(
            "SELECT {} FROM attendance_recaps WHERE year = $1 AND month = $2 ORDER BY employee_id",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, AttendanceRecap>(&query)
            .bind(period.year())
            .bind(period.month() as i32)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_recap_repository_is_send_sync() {
        fn check_send_sync<T: Send + Sync>() {}
        check_send_sync::<MockAttendanceRecapRepositoryTrait>();
    }
}
