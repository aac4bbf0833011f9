use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::error::EngineError;
use crate::models::{Payroll, PayrollDerivation};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PayrollRepositoryTrait: Send + Sync {
    /// Create-or-replace the derived fields for (employee_id, period).
    /// Re-deriving overwrites gross/net pay, the recap reference, the pay
    /// date and the status; the manually-set deduction/allowance/bonus
    /// maps are left exactly as stored.
    async fn upsert_derived(
        &self,
        db: &PgPool,
        derivation: &PayrollDerivation,
    ) -> Result<Payroll, EngineError>;

    async fn find_by_employee_and_period(
        &self,
        db: &PgPool,
        employee_id: i64,
        period: &str,
    ) -> Result<Option<Payroll>, EngineError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PgPayrollRepository;

impl PgPayrollRepository {
    pub fn new() -> Self {
        Self
    }
}

const SELECT_COLUMNS: &str = "id, employee_id, attendance_recap_id, period, pay_date, \
     gross_pay, net_pay, deductions, allowances, bonuses, notes, status, created_at, updated_at";

/// The conflict branch rewrites only the derived columns; the manually
/// maintained deduction/allowance/bonus maps must never appear in it.
fn upsert_derived_query() -> String {
    format!(
        "INSERT INTO payrolls (employee_id, period, attendance_recap_id, pay_date, \
         gross_pay, net_pay, deductions, allowances, bonuses, status, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, '{{}}', '{{}}', '{{}}', $7, $8, $8) \
         ON CONFLICT (employee_id, period) DO UPDATE SET \
         attendance_recap_id = EXCLUDED.attendance_recap_id, \
         pay_date = EXCLUDED.pay_date, \
         gross_pay = EXCLUDED.gross_pay, \
         net_pay = EXCLUDED.net_pay, \
         status = EXCLUDED.status, \
         updated_at = EXCLUDED.updated_at \
         RETURNING {}",
        SELECT_COLUMNS
    )
}

#[async_trait]
impl PayrollRepositoryTrait for PgPayrollRepository {
    async fn upsert_derived(
        &self,
        db: &PgPool,
        derivation: &PayrollDerivation,
    ) -> Result<Payroll, EngineError> {
        let now = Utc::now();
        let query = upsert_derived_query();
        let row = sqlx::query_as::<_, Payroll>(&query)
            .bind(derivation.employee_id)
            .bind(&derivation.period)
            .bind(derivation.attendance_recap_id)
            .bind(derivation.pay_date)
            .bind(derivation.gross_pay)
            .bind(derivation.net_pay)
            .bind(derivation.status)
            .bind(now)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn find_by_employee_and_period(
        &self,
        db: &PgPool,
        employee_id: i64,
        period: &str,
    ) -> Result<Option<Payroll>, EngineError> {
        let query = format!(
            "SELECT {} FROM payrolls WHERE employee_id = $1 AND period = $2",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Payroll>(&query)
            .bind(employee_id)
            .bind(period)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_payroll_repository_is_send_sync() {
        fn check_send_sync<T: Send + Sync>() {}
        check_send_sync::<MockPayrollRepositoryTrait>();
    }

    #[test]
    fn re_derivation_never_overwrites_the_manual_maps() {
        let query = upsert_derived_query();
        let update_clause = query
            .split("DO UPDATE SET")
            .nth(1)
            .expect("conflict branch present");
        for column in ["deductions", "allowances", "bonuses"] {
            assert!(
                !update_clause.contains(column),
                "{column} must not be rewritten on conflict"
            );
        }
        for column in [
            "attendance_recap_id",
            "pay_date",
            "gross_pay",
            "net_pay",
            "status",
            "updated_at",
        ] {
            assert!(update_clause.contains(&format!("{column} = EXCLUDED.{column}")));
        }
    }
}
