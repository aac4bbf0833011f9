use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::period::Period;

/// Monthly aggregated attendance summary for one employee, unique on
/// (employee_id, year, month). Fully derived: recomputing from the same
/// Attendance and Leave rows reproduces every field, and any manual edit is
/// clobbered by the next recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecap {
    pub id: i64,
    pub employee_id: i64,
    pub year: i32,
    pub month: i32,
    pub total_days_present: i32,
    pub total_hours_worked: Decimal,
    pub total_days_absent: Decimal,
    pub total_days_leave: Decimal,
    pub total_leave_hours: Decimal,
    pub overtime_hours: Decimal,
    pub late_minutes: i64,
    pub early_departure_minutes: i64,
    pub working_days_in_month: i32,
    pub attendance_rate: Decimal,
    pub status: RecapStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RecapStatus {
    Pending,
    Completed,
    Error,
}

impl Default for RecapStatus {
    fn default() -> Self {
        RecapStatus::Pending
    }
}

impl AttendanceRecap {
    /// Human-readable period label, e.g. `"August 2025"`.
    pub fn period_name(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month as u32, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.period_key())
    }

    /// Sortable period key, e.g. `"2025-08"`.
    pub fn period_key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// The complete result of one recap calculation, produced atomically before
/// any persistence and consumed whole by the upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecapCalculation {
    pub employee_id: i64,
    pub period: Period,
    pub total_days_present: i32,
    pub total_hours_worked: Decimal,
    pub total_days_absent: Decimal,
    pub total_days_leave: Decimal,
    pub total_leave_hours: Decimal,
    pub overtime_hours: Decimal,
    pub late_minutes: i64,
    pub early_departure_minutes: i64,
    pub working_days_in_month: i32,
    pub attendance_rate: Decimal,
    pub status: RecapStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recap_status_serde_snake_case() {
        let s: RecapStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(s, RecapStatus::Completed);
        let v = serde_json::to_value(RecapStatus::Error).unwrap();
        assert_eq!(v, serde_json::json!("error"));
    }

    #[test]
    fn period_labels_from_stored_year_and_month() {
        let recap = AttendanceRecap {
            id: 1,
            employee_id: 1,
            year: 2025,
            month: 2,
            total_days_present: 0,
            total_hours_worked: Decimal::ZERO,
            total_days_absent: Decimal::ZERO,
            total_days_leave: Decimal::ZERO,
            total_leave_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            late_minutes: 0,
            early_departure_minutes: 0,
            working_days_in_month: 20,
            attendance_rate: Decimal::ZERO,
            status: RecapStatus::Completed,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(recap.period_name(), "February 2025");
        assert_eq!(recap.period_key(), "2025-02");
    }
}
