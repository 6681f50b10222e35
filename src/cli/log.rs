use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::config::Config;
use crate::data::model::{ClockDuration, DayEntry};
use crate::data::store;

use super::parse_date;

#[derive(Args)]
pub struct LogArgs {
    #[arg(long, help = "Day to record (YYYY-MM-DD)")]
    pub date: String,

    #[arg(long, help = "Time worked as HH:MM")]
    pub hours: String,

    #[arg(long, help = "Weekday label [default: derived from the date]")]
    pub day_of_week: Option<String>,

    #[arg(long, help = "Mark the day as not editable")]
    pub disable: bool,
}

pub fn run(args: LogArgs) -> Result<()> {
    let config = Config::load()?;
    let days_file = config.days_file();
    let mut log = store::load_days(&days_file)?;

    let date = parse_date(&args.date)?;
    let hours: ClockDuration = args.hours.parse()?;

    let mut entry = DayEntry::new(date, hours);
    if let Some(label) = args.day_of_week {
        entry.day_of_week = label;
    }
    entry.disable = args.disable;

    log.upsert(entry);
    store::save_days(&days_file, &log)?;
    info!(%date, %hours, "day logged");

    println!("Logged {hours} for {date}");
    Ok(())
}
