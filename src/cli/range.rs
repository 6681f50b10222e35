use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::data::store;
use crate::data::week;

#[derive(Args)]
pub struct RangeArgs {
    #[arg(long, help = "Position of the week in the schedule (0-based)")]
    pub index: usize,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

pub fn run(args: RangeArgs) -> Result<()> {
    let config = Config::load()?;
    let schedule = store::load_schedule(&config.schedule_file())?;

    let range = week::week_range(&schedule.weeks, args.index).ok_or_else(|| {
        anyhow::anyhow!(
            "Week index {} is out of range (schedule has {} weeks)",
            args.index,
            schedule.weeks.len()
        )
    })?;

    if args.json {
        let json = serde_json::json!({
            "index": args.index,
            "start": range.start,
            "end": range.end,
            "start_label": week::format_short_date(range.start),
            "end_label": week::format_short_date(range.end),
            "year": week::format_year(range.end),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}", week::format_range_label(range));
    }

    Ok(())
}
