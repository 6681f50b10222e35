mod current;
mod due;
mod init;
mod list;
mod log;
mod nav;
mod range;
mod refresh;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::config;

#[derive(Parser)]
#[command(name = "weeks", about = "Navigate timesheet weeks and roll days up into them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Treat this date as today (YYYY-MM-DD)")]
    pub today: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    Init(init::InitArgs),
    List(list::ListArgs),
    Current(current::CurrentArgs),
    Range(range::RangeArgs),
    Nav(nav::NavArgs),
    Log(log::LogArgs),
    Due(due::DueArgs),
    Refresh(refresh::RefreshArgs),
}

pub fn run(cli: Cli) -> Result<()> {
    let today = resolve_today(cli.today.as_deref())?;
    tracing::debug!(%today, "resolved today");
    match cli.command {
        Command::Init(args) => init::run(args, today),
        Command::List(args) => list::run(args, today),
        Command::Current(args) => current::run(args, today),
        Command::Range(args) => range::run(args),
        Command::Nav(args) => nav::run(args, today),
        Command::Log(args) => log::run(args),
        Command::Due(args) => due::run(args),
        Command::Refresh(args) => refresh::run(args, today),
    }
}

fn resolve_today(flag: Option<&str>) -> Result<NaiveDate> {
    if let Some(raw) = flag {
        return parse_date(raw);
    }
    match config::today_override()? {
        Some(date) => Ok(date),
        None => Ok(Local::now().date_naive()),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("Invalid date format: {raw}"))
}
