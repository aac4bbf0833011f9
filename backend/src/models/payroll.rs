use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::collections::BTreeMap;

/// Labelled amounts attached to a payroll by hand (e.g. a named bonus).
/// Derivation never writes these; see [`PayrollDerivation`].
pub type MoneyMap = BTreeMap<String, Decimal>;

/// One payroll record per (employee, pay period), referencing at most one
/// attendance recap. Hour inputs always come from the recap; payroll never
/// re-reads raw attendance.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payroll {
    pub id: i64,
    pub employee_id: i64,
    pub attendance_recap_id: Option<i64>,
    /// Sortable period key, e.g. `"2025-08"`.
    pub period: String,
    pub pay_date: Option<NaiveDate>,
    pub gross_pay: Decimal,
    /// Currently always equal to `gross_pay`: there is no deduction model
    /// yet. The maps below exist but are not netted automatically.
    pub net_pay: Decimal,
    pub deductions: Json<MoneyMap>,
    pub allowances: Json<MoneyMap>,
    pub bonuses: Json<MoneyMap>,
    pub notes: Option<String>,
    pub status: PayrollStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    Pending,
    Calculated,
    Completed,
    Cancelled,
}

/// Fields a (re-)derivation is allowed to overwrite for an existing
/// (employee, period) record. Manually maintained maps are deliberately
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollDerivation {
    pub employee_id: i64,
    pub period: String,
    pub attendance_recap_id: Option<i64>,
    pub pay_date: NaiveDate,
    pub gross_pay: Decimal,
    pub net_pay: Decimal,
    pub status: PayrollStatus,
}
