//! Payroll derivation: turns one employee's recap into pay figures for the
//! period. The recap is the only hour source; raw attendance is never read
//! here.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::{self, Config};
use crate::error::EngineError;
use crate::models::{Payroll, PayrollDerivation, PayrollStatus, Period};
use crate::repositories::{PayrollRepositoryTrait, PgPayrollRepository};
use crate::services::recap::{PayrollHoursSummary, RecapProviderTrait};
use crate::utils::time::today_local;

/// Rates and conversions used when deriving pay.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollPolicy {
    /// Applied when the caller does not pass an explicit rate.
    pub hourly_rate: Decimal,
    pub overtime_multiplier: Decimal,
    pub hours_per_day: Decimal,
    /// Local calendar used to stamp the pay date.
    pub time_zone: Tz,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            hourly_rate: config::DEFAULT_HOURLY_RATE,
            overtime_multiplier: config::DEFAULT_OVERTIME_MULTIPLIER,
            hours_per_day: config::STANDARD_DAY_HOURS,
            time_zone: Tz::UTC,
        }
    }
}

impl PayrollPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            hourly_rate: config.default_hourly_rate,
            overtime_multiplier: config.overtime_multiplier,
            hours_per_day: config.standard_day_hours,
            time_zone: config.time_zone,
        }
    }
}

pub struct PayrollService {
    pool: PgPool,
    recaps: Arc<dyn RecapProviderTrait>,
    payrolls: Arc<dyn PayrollRepositoryTrait>,
    policy: PayrollPolicy,
}

impl PayrollService {
    pub fn new(pool: PgPool, recaps: Arc<dyn RecapProviderTrait>, policy: PayrollPolicy) -> Self {
        Self {
            pool,
            recaps,
            payrolls: Arc::new(PgPayrollRepository::new()),
            policy,
        }
    }

    pub fn with_repositories(
        pool: PgPool,
        recaps: Arc<dyn RecapProviderTrait>,
        payrolls: Arc<dyn PayrollRepositoryTrait>,
        policy: PayrollPolicy,
    ) -> Self {
        Self {
            pool,
            recaps,
            payrolls,
            policy,
        }
    }

    /// Derive (or re-derive) pay for one employee and period. Pay splits
    /// into three buckets off the recap:
    ///
    /// * standard pay: days present x hours per day, at the hourly rate
    /// * overtime pay: overtime hours at rate x overtime multiplier
    /// * leave pay: approved leave hours at the plain hourly rate
    ///
    /// Net pay equals gross pay until a deduction model exists. Failure to
    /// obtain a usable recap is reported as `DerivationFailure` with the
    /// employee and period attached; storage errors on the write path
    /// propagate untouched so callers can tell an outage apart.
    pub async fn derive(
        &self,
        employee_id: i64,
        period: Period,
        hourly_rate: Option<Decimal>,
    ) -> Result<Payroll, EngineError> {
        let recap = self
            .recaps
            .recap_for_payroll(employee_id, period)
            .await
            .map_err(|err| EngineError::derivation(employee_id, period, err))?;

        let summary = PayrollHoursSummary::from_recap(&recap, self.policy.hours_per_day);
        let rate = hourly_rate.unwrap_or(self.policy.hourly_rate);

        let standard_pay = summary.standard_hours * rate;
        let overtime_pay = summary.overtime_hours * rate * self.policy.overtime_multiplier;
        let leave_pay = summary.leave_hours * rate;
        let gross_pay = standard_pay + overtime_pay + leave_pay;

        let derivation = PayrollDerivation {
            employee_id,
            period: period.key(),
            attendance_recap_id: Some(recap.id),
            pay_date: today_local(&self.policy.time_zone),
            gross_pay,
            net_pay: gross_pay,
            status: PayrollStatus::Calculated,
        };

        tracing::info!(
            employee_id,
            period = %period,
            gross_pay = %gross_pay,
            "derived payroll from recap"
        );

        self.payrolls.upsert_derived(&self.pool, &derivation).await
    }

    pub async fn find(
        &self,
        employee_id: i64,
        period: Period,
    ) -> Result<Option<Payroll>, EngineError> {
        self.payrolls
            .find_by_employee_and_period(&self.pool, employee_id, &period.key())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_lazy_pool;
    use crate::models::{AttendanceRecap, RecapStatus};
    use crate::repositories::payroll::MockPayrollRepositoryTrait;
    use crate::services::recap::MockRecapProviderTrait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sqlx::types::Json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn pool() -> PgPool {
        create_lazy_pool("postgres://localhost/recap_backend_test").expect("lazy pool")
    }

    fn recap(employee_id: i64, present: i32, overtime: &str, leave_hours: &str) -> AttendanceRecap {
        AttendanceRecap {
            id: 77,
            employee_id,
            year: 2025,
            month: 9,
            total_days_present: present,
            total_hours_worked: Decimal::from(present) * dec("8"),
            total_days_absent: Decimal::ZERO,
            total_days_leave: dec(leave_hours) / dec("8"),
            total_leave_hours: dec(leave_hours),
            overtime_hours: dec(overtime),
            late_minutes: 0,
            early_departure_minutes: 0,
            working_days_in_month: 22,
            attendance_rate: dec("90.91"),
            status: RecapStatus::Completed,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn payroll_from(derivation: &PayrollDerivation) -> Payroll {
        Payroll {
            id: 1,
            employee_id: derivation.employee_id,
            attendance_recap_id: derivation.attendance_recap_id,
            period: derivation.period.clone(),
            pay_date: Some(derivation.pay_date),
            gross_pay: derivation.gross_pay,
            net_pay: derivation.net_pay,
            deductions: Json(Default::default()),
            allowances: Json(Default::default()),
            bonuses: Json(Default::default()),
            notes: None,
            status: derivation.status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(
        recaps: MockRecapProviderTrait,
        payrolls: MockPayrollRepositoryTrait,
    ) -> PayrollService {
        PayrollService::with_repositories(
            pool(),
            Arc::new(recaps),
            Arc::new(payrolls),
            PayrollPolicy::default(),
        )
    }

    #[tokio::test]
    async fn derives_pay_from_recap_hour_buckets() {
        let mut recaps = MockRecapProviderTrait::new();
        recaps
            .expect_recap_for_payroll()
            .times(1)
            .returning(|employee_id, _| Ok(recap(employee_id, 20, "10", "8")));

        let mut payrolls = MockPayrollRepositoryTrait::new();
        payrolls
            .expect_upsert_derived()
            .times(1)
            .returning(|_, derivation| Ok(payroll_from(derivation)));

        let period = Period::new(2025, 9).unwrap();
        let payroll = service(recaps, payrolls)
            .derive(1, period, Some(dec("1000")))
            .await
            .unwrap();

        // 160h standard + 10h overtime at 1.5x + 8h leave, all at 1000/h
        assert_eq!(payroll.gross_pay, dec("183000"));
        assert_eq!(payroll.net_pay, payroll.gross_pay);
        assert_eq!(payroll.status, PayrollStatus::Calculated);
        assert_eq!(payroll.attendance_recap_id, Some(77));
        assert_eq!(payroll.period, "2025-09");
    }

    #[tokio::test]
    async fn falls_back_to_policy_rate_when_none_is_given() {
        let mut recaps = MockRecapProviderTrait::new();
        recaps
            .expect_recap_for_payroll()
            .times(1)
            .returning(|employee_id, _| Ok(recap(employee_id, 10, "0", "0")));

        let mut payrolls = MockPayrollRepositoryTrait::new();
        payrolls
            .expect_upsert_derived()
            .times(1)
            .returning(|_, derivation| Ok(payroll_from(derivation)));

        let period = Period::new(2025, 9).unwrap();
        let payroll = service(recaps, payrolls)
            .derive(1, period, None)
            .await
            .unwrap();

        // 80h at the default 1000/h
        assert_eq!(payroll.gross_pay, dec("80000"));
    }

    #[tokio::test]
    async fn upsert_storage_error_propagates_unwrapped() {
        let mut recaps = MockRecapProviderTrait::new();
        recaps
            .expect_recap_for_payroll()
            .times(1)
            .returning(|employee_id, _| Ok(recap(employee_id, 20, "0", "0")));

        let mut payrolls = MockPayrollRepositoryTrait::new();
        payrolls
            .expect_upsert_derived()
            .times(1)
            .returning(|_, _| {
                Err(EngineError::UnavailableDependency(sqlx::Error::PoolTimedOut))
            });

        let period = Period::new(2025, 9).unwrap();
        let err = service(recaps, payrolls)
            .derive(1, period, None)
            .await
            .unwrap_err();

        // An outage on the write path is retryable and must not be
        // reclassified as a derivation failure.
        assert!(matches!(err, EngineError::UnavailableDependency(_)));
    }

    #[tokio::test]
    async fn recap_failure_is_wrapped_with_derivation_context() {
        let mut recaps = MockRecapProviderTrait::new();
        recaps
            .expect_recap_for_payroll()
            .times(1)
            .returning(|employee_id, _| Err(EngineError::EmployeeNotFound(employee_id)));

        let payrolls = MockPayrollRepositoryTrait::new();

        let period = Period::new(2025, 9).unwrap();
        let err = service(recaps, payrolls)
            .derive(42, period, None)
            .await
            .unwrap_err();

        match err {
            EngineError::DerivationFailure {
                employee_id,
                source,
                ..
            } => {
                assert_eq!(employee_id, 42);
                assert!(matches!(*source, EngineError::EmployeeNotFound(42)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
