use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Args;
use tracing::info;

use crate::config::{CalendarConfig, Config};
use crate::data::model::{Schedule, WeekDescriptor};
use crate::data::{store, week};

use super::parse_date;

#[derive(Args)]
pub struct RefreshArgs {
    #[arg(long, help = "Extend the schedule through this date (YYYY-MM-DD) [default: lookahead from today]")]
    pub end_date: Option<String>,
}

pub fn run(args: RefreshArgs, today: NaiveDate) -> Result<()> {
    let config = Config::load()?;
    let schedule_file = config.schedule_file();
    let current = store::load_schedule(&schedule_file)?;

    let requested = args.end_date.as_deref().map(parse_date).transpose()?;
    let end = refresh_end(&config.calendar, &current.weeks, today, requested);
    if end < config.calendar.start_date {
        bail!(
            "End date {end} is before start date {}",
            config.calendar.start_date
        );
    }

    let schedule = Schedule {
        weeks: week::generate_weeks(config.calendar.start_date, end, config.calendar.week_start),
    };
    let added = schedule.weeks.len().saturating_sub(current.weeks.len());
    store::save_schedule(&schedule_file, &schedule)?;
    info!(weeks = schedule.weeks.len(), added, %end, "schedule refreshed");

    println!(
        "Schedule has {} weeks ({added} added)",
        schedule.weeks.len()
    );
    Ok(())
}

/// Last day the refreshed schedule must cover. Never earlier than what the
/// schedule already covers.
fn refresh_end(
    calendar: &CalendarConfig,
    weeks: &[WeekDescriptor],
    today: NaiveDate,
    requested: Option<NaiveDate>,
) -> NaiveDate {
    let target = requested.unwrap_or_else(|| calendar.horizon(today));
    match weeks.iter().map(|w| w.end).max() {
        Some(covered) => target.max(covered),
        None => target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar() -> CalendarConfig {
        CalendarConfig {
            start_date: date(2024, 11, 11),
            week_start: Weekday::Mon,
            lookahead_weeks: 4,
        }
    }

    #[test]
    fn test_refresh_end_uses_lookahead() {
        let weeks = week::generate_weeks(date(2024, 11, 11), date(2024, 12, 1), Weekday::Mon);
        assert_eq!(
            refresh_end(&calendar(), &weeks, date(2025, 1, 15), None),
            date(2025, 2, 12)
        );
    }

    #[test]
    fn test_refresh_end_never_shrinks() {
        let weeks = week::generate_weeks(date(2024, 11, 11), date(2025, 3, 1), Weekday::Mon);
        let covered = weeks.last().unwrap().end;
        assert_eq!(
            refresh_end(&calendar(), &weeks, date(2024, 11, 20), None),
            covered
        );
        assert_eq!(
            refresh_end(&calendar(), &weeks, date(2024, 11, 20), Some(date(2024, 12, 1))),
            covered
        );
    }

    #[test]
    fn test_refresh_end_explicit_date_on_empty_schedule() {
        assert_eq!(
            refresh_end(&calendar(), &[], date(2024, 11, 20), Some(date(2025, 6, 1))),
            date(2025, 6, 1)
        );
    }
}
