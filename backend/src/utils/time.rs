//! Shift-window arithmetic for clock events.
//!
//! All comparisons operate on time-of-day values. A window whose end is
//! numerically earlier than its start crosses midnight and is treated as
//! spanning into the next day; comparing raw times for such windows would
//! under-count lateness and over-count early departure.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Whether a shift window crosses midnight.
pub fn is_overnight(start: NaiveTime, end: NaiveTime) -> bool {
    end < start
}

fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Minutes the clock-in falls after the window start; zero when on time or
/// early. For overnight windows a clock-in at or before the end time is
/// read as next-day and measured across midnight; a clock-in inside the
/// dead gap between end and start is before the window and counts zero.
pub fn minutes_late(start: NaiveTime, end: NaiveTime, clock_in: NaiveTime) -> i64 {
    let s = minute_of_day(start);
    let e = minute_of_day(end);
    let c = minute_of_day(clock_in);

    if is_overnight(start, end) {
        if c >= s {
            c - s
        } else if c <= e {
            (MINUTES_PER_DAY - s) + c
        } else {
            0
        }
    } else {
        (c - s).max(0)
    }
}

/// Minutes the clock-out falls before the window end; zero when the full
/// window was worked. Overnight windows mirror [`minutes_late`]: a
/// clock-out at or after the start time is still on the first day, one at
/// or before the end time is on the next day, and the dead gap counts zero.
pub fn minutes_early_departure(start: NaiveTime, end: NaiveTime, clock_out: NaiveTime) -> i64 {
    let s = minute_of_day(start);
    let e = minute_of_day(end);
    let c = minute_of_day(clock_out);

    if is_overnight(start, end) {
        if c <= e {
            e - c
        } else if c >= s {
            (MINUTES_PER_DAY - c) + e
        } else {
            0
        }
    } else {
        (e - c).max(0)
    }
}

/// Today's date in the configured timezone.
pub fn today_local(tz: &Tz) -> NaiveDate {
    now_in_timezone(tz).date_naive()
}

/// Returns the current time in the configured timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}
