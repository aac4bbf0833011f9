use thiserror::Error;

use crate::models::period::Period;

/// Errors surfaced by the derivation engine.
///
/// Per-employee failures are only swallowed inside the monthly batch, which
/// records them as error entries and keeps going. Everywhere else these
/// propagate to the caller untouched; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid period: year {year}, month {month}")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("employee {0} not found")]
    EmployeeNotFound(i64),

    #[error("storage unavailable: {0}")]
    UnavailableDependency(#[from] sqlx::Error),

    #[error("payroll derivation failed for employee {employee_id} in {period}: {source}")]
    DerivationFailure {
        employee_id: i64,
        period: Period,
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    pub fn derivation(employee_id: i64, period: Period, source: EngineError) -> Self {
        EngineError::DerivationFailure {
            employee_id,
            period,
            source: Box::new(source),
        }
    }
}
