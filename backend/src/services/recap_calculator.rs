//! Pure reduction of one month of attendance and leave data into recap
//! figures. No I/O happens here; the orchestration service fetches the
//! inputs and persists the result.

use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

use crate::config::STANDARD_DAY_HOURS;
use crate::models::{Attendance, Leave, Period, RecapCalculation, RecapStatus, Shift};
use crate::utils::time::{minutes_early_departure, minutes_late};

/// Tunables for the calculation. One working day is worth this many hours,
/// both as the overtime baseline and for converting leave days to hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecapPolicy {
    pub hours_per_day: Decimal,
}

impl Default for RecapPolicy {
    fn default() -> Self {
        RecapPolicy {
            hours_per_day: STANDARD_DAY_HOURS,
        }
    }
}

/// One month of raw material for a single employee, already fetched.
/// Leaves must be approved rows overlapping the month in any way.
#[derive(Debug)]
pub struct RecapInputs<'a> {
    pub attendances: &'a [Attendance],
    pub shifts: &'a HashMap<i64, Shift>,
    pub leaves: &'a [Leave],
}

/// Calendar days in the month that are not Saturday or Sunday.
pub fn working_days_in_month(period: Period) -> i32 {
    let mut count = 0;
    let mut cursor = period.first_day();
    let last = period.last_day();
    while cursor <= last {
        let weekday = cursor.weekday();
        if weekday != chrono::Weekday::Sat && weekday != chrono::Weekday::Sun {
            count += 1;
        }
        cursor = match cursor.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    count
}

/// Reduces the month's records into one recap result.
///
/// The whole result is produced before anything is persisted, so a recap is
/// never half-written. Re-running over unchanged inputs reproduces every
/// field exactly.
///
/// Notable behaviour, kept deliberately:
/// - A row with a clock-in but no clock-out counts as present and
///   contributes its stored `hours` value, or zero when none is stored yet.
/// - Weekend attendance counts toward presence even though weekends are
///   excluded from `working_days_in_month`; the attendance rate is not
///   clamped and can exceed 100%.
/// - Leave spans are credited with their full `duration` in every month
///   they touch; they are not prorated at month boundaries.
pub fn calculate(
    employee_id: i64,
    period: Period,
    inputs: &RecapInputs<'_>,
    policy: &RecapPolicy,
) -> RecapCalculation {
    let working_days = working_days_in_month(period);

    let total_days_present = inputs
        .attendances
        .iter()
        .filter(|att| att.is_present())
        .count() as i32;

    let total_hours_worked: Decimal = inputs
        .attendances
        .iter()
        .map(Attendance::worked_hours)
        .sum();

    let total_days_leave: Decimal = inputs.leaves.iter().map(|leave| leave.duration).sum();
    let total_leave_hours = total_days_leave * policy.hours_per_day;

    let standard_hours = Decimal::from(total_days_present) * policy.hours_per_day;
    let overtime_hours = (total_hours_worked - standard_hours).max(Decimal::ZERO);

    let mut late_minutes = 0i64;
    let mut early_departure_minutes = 0i64;
    for att in inputs.attendances {
        let (Some(shift_id), Some(clock_in), Some(clock_out)) =
            (att.shift_id, att.clock_in, att.clock_out)
        else {
            continue;
        };
        let Some(shift) = inputs.shifts.get(&shift_id) else {
            continue;
        };
        late_minutes += minutes_late(shift.start_time, shift.end_time, clock_in);
        early_departure_minutes +=
            minutes_early_departure(shift.start_time, shift.end_time, clock_out);
    }

    let total_expected_days = Decimal::from(working_days) - total_days_leave;
    let attendance_rate = if total_expected_days > Decimal::ZERO {
        (Decimal::from(total_days_present) / total_expected_days * Decimal::from(100))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    let total_days_absent = (Decimal::from(working_days)
        - Decimal::from(total_days_present)
        - total_days_leave)
        .max(Decimal::ZERO);

    RecapCalculation {
        employee_id,
        period,
        total_days_present,
        total_hours_worked,
        total_days_absent,
        total_days_leave,
        total_leave_hours,
        overtime_hours,
        late_minutes,
        early_departure_minutes,
        working_days_in_month: working_days,
        attendance_rate,
        status: RecapStatus::Completed,
    }
}
