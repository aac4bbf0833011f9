use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Named time window shared by many attendance records. Immutable
/// reference data.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shift {
    pub id: i64,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Shift {
    /// An end time numerically earlier than the start time means the window
    /// crosses midnight.
    pub fn is_overnight(&self) -> bool {
        self.end_time < self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(start: (u32, u32), end: (u32, u32)) -> Shift {
        Shift {
            id: 1,
            name: "test".to_string(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[test]
    fn day_shift_is_not_overnight() {
        assert!(!shift((8, 0), (16, 0)).is_overnight());
    }

    #[test]
    fn night_shift_is_overnight() {
        assert!(shift((22, 0), (6, 0)).is_overnight());
    }
}
