use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;

/// One payroll/recap cycle: a validated (year, month) pair.
///
/// Construction goes through [`Period::new`], so a held value always maps to
/// a real calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, EngineError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidPeriod { year, month });
        }
        Ok(Period { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Period {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("validated by Period::new")
    }

    /// Last calendar day of the month, inclusive. Probes downward from the
    /// 31st instead of rolling over to the next month, which would overflow
    /// for December of chrono's maximum year.
    pub fn last_day(&self) -> NaiveDate {
        (28..=31)
            .rev()
            .find_map(|day| NaiveDate::from_ymd_opt(self.year, self.month, day))
            .expect("validated by Period::new")
    }

    /// Human-readable label, e.g. `"August 2025"`.
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// Sortable key, e.g. `"2025-08"`. Also used as the payroll period key.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
