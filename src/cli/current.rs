use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use crate::config::Config;
use crate::data::store;
use crate::data::week::{self, WeekRange};

#[derive(Args)]
pub struct CurrentArgs {
    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

pub fn run(args: CurrentArgs, today: NaiveDate) -> Result<()> {
    let config = Config::load()?;
    let schedule = store::load_schedule(&config.schedule_file())?;

    let ordinal = week::resolve_current_week(&schedule.weeks, today)
        .context("Schedule has no weeks")?;
    let found = schedule
        .weeks
        .iter()
        .find(|w| w.week == ordinal)
        .context("Resolved week is missing from the schedule")?;
    let range = WeekRange {
        start: found.start,
        end: found.end,
    };
    let contains_today = found.contains_day(today);

    if args.json {
        let json = serde_json::json!({
            "week": ordinal,
            "start": range.start,
            "end": range.end,
            "label": week::format_range_label(range),
            "contains_today": contains_today,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("Week {ordinal}: {}", week::format_range_label(range));
        if !contains_today {
            println!("Today ({today}) is outside the schedule; showing the first week.");
        }
    }

    Ok(())
}
