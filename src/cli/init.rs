use std::fs;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Weekday};
use clap::Args;
use tracing::info;

use crate::config::{CalendarConfig, Config, DataConfig};
use crate::data::model::{DayLog, Schedule};
use crate::data::{store, week};
use crate::ui;

use super::parse_date;

const DEFAULT_DATA_DIR: &str = "~/.weeks";
const DEFAULT_LOOKAHEAD_WEEKS: u32 = 4;

#[derive(Args)]
pub struct InitArgs {
    #[arg(long, help = "Path to data directory [default: ~/.weeks]")]
    pub data_dir: Option<String>,

    #[arg(long, help = "First day the schedule must cover (YYYY-MM-DD)")]
    pub start_date: Option<String>,

    #[arg(long, help = "Last day the schedule must cover (YYYY-MM-DD) [default: four weeks from today]")]
    pub end_date: Option<String>,

    #[arg(long, default_value = "Mon", help = "Weekday every week starts on")]
    pub week_start: String,

    #[arg(long, help = "Run without interactive prompts")]
    pub non_interactive: bool,
}

pub fn run(args: InitArgs, today: NaiveDate) -> Result<()> {
    let config_path = Config::config_path();
    if config_path.exists() {
        bail!(
            "Already initialized. Config exists at {}",
            config_path.display()
        );
    }

    let week_start: Weekday = args
        .week_start
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid weekday '{}'", args.week_start))?;

    let (data_dir, start_date) = if args.non_interactive {
        let data_dir = args
            .data_dir
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let start_str = args
            .start_date
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("--start-date is required in non-interactive mode"))?;
        (data_dir, parse_date(start_str)?)
    } else {
        let data_dir = ui::input_text(
            "Data directory",
            Some(args.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR)),
        )?
        .ok_or_else(|| anyhow::anyhow!("Cancelled"))?;

        let start = match args.start_date.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => ui::input_date("Schedule start date", None)?
                .ok_or_else(|| anyhow::anyhow!("Cancelled"))?,
        };
        (data_dir, start)
    };

    let calendar = CalendarConfig {
        start_date,
        week_start,
        lookahead_weeks: DEFAULT_LOOKAHEAD_WEEKS,
    };

    let end_date = match args.end_date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None if args.non_interactive => calendar.horizon(today),
        None => ui::input_date("Schedule end date", Some(calendar.horizon(today)))?
            .ok_or_else(|| anyhow::anyhow!("Cancelled"))?,
    };
    if end_date < start_date {
        bail!("End date {end_date} is before start date {start_date}");
    }

    let config = Config {
        data: DataConfig {
            directory: data_dir.clone(),
        },
        calendar,
    };

    config.save(&config_path)?;
    println!("Config saved to {}", config_path.display());

    let data_path = std::path::PathBuf::from(shellexpand::tilde(&data_dir).into_owned());
    fs::create_dir_all(&data_path)
        .with_context(|| format!("Failed to create data directory {}", data_path.display()))?;

    let schedule = Schedule {
        weeks: week::generate_weeks(start_date, end_date, week_start),
    };
    let schedule_file = data_path.join("schedule.json");
    store::save_schedule(&schedule_file, &schedule)?;
    info!(weeks = schedule.weeks.len(), path = %schedule_file.display(), "schedule generated");
    println!(
        "Created {} with {} weeks",
        schedule_file.display(),
        schedule.weeks.len()
    );

    let days_file = data_path.join("days.json");
    store::save_days(&days_file, &DayLog::new())?;
    println!("Created {}", days_file.display());

    Ok(())
}
