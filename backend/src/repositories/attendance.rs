use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::EngineError;
use crate::models::Attendance;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepositoryTrait: Send + Sync {
    /// Attendance rows for one employee within an inclusive date range.
    async fn find_by_employee_and_range(
        &self,
        db: &PgPool,
        employee_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Attendance>, EngineError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PgAttendanceRepository;

impl PgAttendanceRepository {
    pub fn new() -> Self {
        Self
    }
}

const SELECT_COLUMNS: &str =
    "id, employee_id, date, clock_in, clock_out, shift_id, hours, remarks, created_at, updated_at";

#[async_trait]
impl AttendanceRepositoryTrait for PgAttendanceRepository {
    async fn find_by_employee_and_range(
        &self,
        db: &PgPool,
        employee_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Attendance>, EngineError> {
        let query = format!(
            "SELECT {} FROM attendances WHERE employee_id = $1 AND date BETWEEN $2 AND $3 ORDER BY date",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Attendance>(&query)
            .bind(employee_id)
            .bind(from)
            .bind(to)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }
}
