use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;

use crate::config::Config;
use crate::data::store;
use crate::data::week::{self, WeekRange};

#[derive(Args)]
pub struct ListArgs {
    #[arg(long, help = "Output as JSON")]
    pub json: bool,
}

#[derive(Serialize)]
struct WeekRow {
    index: usize,
    week: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<String>,
    start: NaiveDate,
    end: NaiveDate,
    label: String,
    disabled: bool,
    current: bool,
}

pub fn run(args: ListArgs, today: NaiveDate) -> Result<()> {
    let config = Config::load()?;
    let schedule = store::load_schedule(&config.schedule_file())?;

    let disabled = week::disabled_weeks(&schedule.weeks, today);
    let current = week::resolve_current_week(&schedule.weeks, today);

    let rows: Vec<WeekRow> = schedule
        .weeks
        .iter()
        .enumerate()
        .map(|(index, w)| WeekRow {
            index,
            week: w.week,
            month: w.month.clone(),
            start: w.start,
            end: w.end,
            label: week::format_range_label(WeekRange {
                start: w.start,
                end: w.end,
            }),
            disabled: disabled[index],
            current: current == Some(w.week),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No weeks in schedule.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Week", "Month", "Range", "Status"]);
    for row in &rows {
        let status = if row.current {
            "current"
        } else if row.disabled {
            "disabled"
        } else {
            ""
        };
        table.add_row(vec![
            row.index.to_string(),
            row.week.to_string(),
            row.month.clone().unwrap_or_default(),
            row.label.clone(),
            status.to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}
