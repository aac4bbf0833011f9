use anyhow::anyhow;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Hours that make up one standard working day, shared by the overtime
/// baseline and the leave-day-to-hours conversion.
pub const STANDARD_DAY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Fallback hourly rate applied when the caller does not supply one.
pub const DEFAULT_HOURLY_RATE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Overtime hours are paid at this multiple of the hourly rate.
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub time_zone: Tz,
    pub standard_day_hours: Decimal,
    pub default_hourly_rate: Decimal,
    pub overtime_multiplier: Decimal,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/recap_backend".to_string());

        let time_zone_name = env::var("APP_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let standard_day_hours = decimal_env("STANDARD_DAY_HOURS", STANDARD_DAY_HOURS);
        let default_hourly_rate = decimal_env("DEFAULT_HOURLY_RATE", DEFAULT_HOURLY_RATE);
        let overtime_multiplier = decimal_env("OVERTIME_MULTIPLIER", DEFAULT_OVERTIME_MULTIPLIER);

        Ok(Config {
            database_url,
            time_zone,
            standard_day_hours,
            default_hourly_rate,
            overtime_multiplier,
        })
    }
}

fn decimal_env(key: &str, default: Decimal) -> Decimal {
    env::var(key)
        .ok()
        .and_then(|raw| Decimal::from_str(&raw).ok())
        .unwrap_or(default)
}
