use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One clock-in/clock-out record per employee per calendar date
/// (unique on that pair). Created on clock-in, mutated on clock-out or
/// corrective edit, never auto-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub clock_in: Option<NaiveTime>,
    pub clock_out: Option<NaiveTime>,
    pub shift_id: Option<i64>,
    /// Worked duration stored when the record is completed. An open record
    /// (no clock-out) has no true duration yet and counts as zero.
    pub hours: Option<Decimal>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attendance {
    /// An open record still counts as present; a clock-out is not required.
    pub fn is_present(&self) -> bool {
        self.clock_in.is_some()
    }

    pub fn worked_hours(&self) -> Decimal {
        self.hours.unwrap_or(Decimal::ZERO)
    }
}
