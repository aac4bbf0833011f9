//! Read-only access to the employee directory.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::EngineError;
use crate::models::Employee;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepositoryTrait: Send + Sync {
    /// All employees eligible for batch recap generation.
    async fn find_active(&self, db: &PgPool) -> Result<Vec<Employee>, EngineError>;

    /// Single employee lookup; `None` when the id does not resolve.
    async fn find_by_id(&self, db: &PgPool, id: i64) -> Result<Option<Employee>, EngineError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PgEmployeeRepository;

impl PgEmployeeRepository {
    pub fn new() -> Self {
        Self
    }
}

const SELECT_COLUMNS: &str = "id, full_name, is_active";

#[async_trait]
impl EmployeeRepositoryTrait for PgEmployeeRepository {
    async fn find_active(&self, db: &PgPool) -> Result<Vec<Employee>, EngineError> {
        let query = format!(
            "SELECT {} FROM employees WHERE is_active = TRUE ORDER BY id",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Employee>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: i64) -> Result<Option<Employee>, EngineError> {
        let query = format!("SELECT {} FROM employees WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_employee_repository_is_send_sync() {
        fn check_send_sync<T: Send + Sync>() {}
        check_send_sync::<MockEmployeeRepositoryTrait>();
    }
}
