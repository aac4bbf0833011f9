use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Approved absence span owned by the leave-approval workflow. The engine
/// only reads approved rows overlapping the target month.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Leave {
    pub id: i64,
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Days of leave; half days and the like are allowed.
    pub duration: Decimal,
    pub status: LeaveStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leave_status_serde_snake_case() {
        let s: LeaveStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(s, LeaveStatus::Approved);
        let v = serde_json::to_value(LeaveStatus::Rejected).unwrap();
        assert_eq!(v, serde_json::json!("rejected"));
    }
}
