//! Monthly recap generation command.
//!
//! Defaults to the current month in the configured timezone. Passing
//! `--employee` targets one employee; `--recalculate` refreshes only the
//! recaps that already exist instead of covering every active employee.

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use tracing_subscriber::EnvFilter;

use recap_backend::config::Config;
use recap_backend::db::create_pool;
use recap_backend::models::Period;
use recap_backend::services::{RecapOutcome, RecapPolicy, RecapService};
use recap_backend::utils::time::today_local;

#[derive(Debug, Default)]
struct CliArgs {
    year: Option<i32>,
    month: Option<u32>,
    employee: Option<i64>,
    recalculate: bool,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = CliArgs::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--year" => {
                    parsed.year = Some(
                        next_value(&mut args, "--year")?
                            .parse()
                            .context("--year must be an integer")?,
                    );
                }
                "--month" => {
                    parsed.month = Some(
                        next_value(&mut args, "--month")?
                            .parse()
                            .context("--month must be a number from 1 to 12")?,
                    );
                }
                "--employee" => {
                    parsed.employee = Some(
                        next_value(&mut args, "--employee")?
                            .parse()
                            .context("--employee must be an employee id")?,
                    );
                }
                "--recalculate" => parsed.recalculate = true,
                other => bail!(
                    "unrecognised argument: {other} \
                     (expected --year, --month, --employee, --recalculate)"
                ),
            }
        }
        Ok(parsed)
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().with_context(|| format!("{flag} requires a value"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    let args = CliArgs::parse(std::env::args().skip(1))?;

    let today = today_local(&config.time_zone);
    let period = Period::new(
        args.year.unwrap_or_else(|| today.year()),
        args.month.unwrap_or_else(|| today.month()),
    )?;

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let service = RecapService::new(
        pool,
        RecapPolicy {
            hours_per_day: config.standard_day_hours,
        },
    );

    if let Some(employee_id) = args.employee {
        let recap = service.generate_for_employee(employee_id, period).await?;
        println!(
            "Recap for employee {} in {}: {} days present, {} hours worked, rate {}%",
            employee_id,
            period.label(),
            recap.total_days_present,
            recap.total_hours_worked,
            recap.attendance_rate
        );
        return Ok(());
    }

    if args.recalculate {
        let updated = service.recalculate_monthly(period).await?;
        println!("Recalculated {} recaps for {}", updated, period.label());
        return Ok(());
    }

    let outcomes = service.generate_monthly(period).await?;
    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    let failed = outcomes.len() - succeeded;
    println!(
        "Generated recaps for {}: {} succeeded, {} failed",
        period.label(),
        succeeded,
        failed
    );
    for outcome in &outcomes {
        if let RecapOutcome::Error { employee, message } = outcome {
            println!("  {employee}: {message}");
        }
    }
    Ok(())
}
