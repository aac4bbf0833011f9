use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Directory projection of an employee. The directory itself is owned
/// elsewhere; the engine only reads these three fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub is_active: bool,
}
