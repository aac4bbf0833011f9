use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::EngineError;
use crate::models::Shift;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShiftRepositoryTrait: Send + Sync {
    /// Shift reference rows for the given ids. Unknown ids are simply
    /// absent from the result.
    async fn find_by_ids(&self, db: &PgPool, ids: Vec<i64>) -> Result<Vec<Shift>, EngineError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PgShiftRepository;

impl PgShiftRepository {
    pub fn new() -> Self {
        Self
    }
}

const SELECT_COLUMNS: &str = "id, name, start_time, end_time";

#[async_trait]
impl ShiftRepositoryTrait for PgShiftRepository {
    async fn find_by_ids(&self, db: &PgPool, ids: Vec<i64>) -> Result<Vec<Shift>, EngineError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {} FROM shifts WHERE id = ANY($1)", SELECT_COLUMNS);
        let rows = sqlx::query_as::<_, Shift>(&query)
            .bind(ids)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }
}
