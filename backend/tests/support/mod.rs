#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime, Utc};
use ctor::ctor;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use recap_backend::models::{Attendance, Leave, LeaveStatus, Shift};

#[ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("valid decimal literal")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

pub fn shift(id: i64, name: &str, start: NaiveTime, end: NaiveTime) -> Shift {
    Shift {
        id,
        name: name.to_string(),
        start_time: start,
        end_time: end,
    }
}

pub fn attendance(
    employee_id: i64,
    on: NaiveDate,
    clock_in: Option<NaiveTime>,
    clock_out: Option<NaiveTime>,
    shift_id: Option<i64>,
    hours: Option<&str>,
) -> Attendance {
    Attendance {
        id: 0,
        employee_id,
        date: on,
        clock_in,
        clock_out,
        shift_id,
        hours: hours.map(dec),
        remarks: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn approved_leave(
    employee_id: i64,
    start: NaiveDate,
    end: NaiveDate,
    duration: &str,
) -> Leave {
    Leave {
        id: 0,
        employee_id,
        start_date: start,
        end_date: end,
        duration: dec(duration),
        status: LeaveStatus::Approved,
    }
}
