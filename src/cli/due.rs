use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::config::Config;
use crate::data::model::WeekBucket;
use crate::data::store;
use crate::data::week::{self, WeekRange};

#[derive(Args)]
pub struct DueArgs {
    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

pub fn run(args: DueArgs) -> Result<()> {
    let config = Config::load()?;
    let schedule = store::load_schedule(&config.schedule_file())?;
    let log = store::load_days(&config.days_file())?;

    let buckets = week::aggregate_days(&log.days, &schedule.weeks);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&buckets)?);
        return Ok(());
    }

    if buckets.is_empty() {
        println!("No logged days fall inside the schedule.");
        return Ok(());
    }

    for bucket in &buckets {
        print_bucket(bucket);
    }
    Ok(())
}

fn print_bucket(bucket: &WeekBucket) {
    let label = week::format_range_label(WeekRange {
        start: bucket.start,
        end: bucket.end,
    });
    match &bucket.month {
        Some(month) => println!("Week {} ({month}): {label}", bucket.week),
        None => println!("Week {}: {label}", bucket.week),
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Date", "Day", "Hours", ""]);
    for day in &bucket.days {
        table.add_row(vec![
            day.date.clone(),
            day.day_of_week.clone(),
            day.hours.clone(),
            if day.disable { "locked" } else { "" }.to_string(),
        ]);
    }
    table.add_row(vec![
        "TOTAL".to_string(),
        String::new(),
        bucket.total().to_string(),
        String::new(),
    ]);
    println!("{table}");
    println!();
}
