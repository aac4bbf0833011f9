use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::EngineError;
use crate::models::Leave;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaveRepositoryTrait: Send + Sync {
    /// Approved leave rows intersecting the inclusive range in any way:
    /// `start_date <= to AND end_date >= from`. Containment is not
    /// required, so a span straddling a month boundary matches both months.
    async fn find_approved_overlapping(
        &self,
        db: &PgPool,
        employee_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Leave>, EngineError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PgLeaveRepository;

impl PgLeaveRepository {
    pub fn new() -> Self {
        Self
    }
}

const SELECT_COLUMNS: &str = "id, employee_id, start_date, end_date, duration, status";

#[async_trait]
impl LeaveRepositoryTrait for PgLeaveRepository {
    async fn find_approved_overlapping(
        &self,
        db: &PgPool,
        employee_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Leave>, EngineError> {
        let query = format!(
            "SELECT {} FROM leaves \
             WHERE employee_id = $1 AND status = 'approved' \
             AND start_date <= $2 AND end_date >= $3 \
             ORDER BY start_date",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Leave>(&query)
            .bind(employee_id)
            .bind(to)
            .bind(from)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_leave_repository_is_send_sync() {
        fn check_send_sync<T: Send + Sync>() {}
        check_send_sync::<MockLeaveRepositoryTrait>();
    }
}
