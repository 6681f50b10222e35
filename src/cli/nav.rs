use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;
use tracing::debug;

use crate::config::Config;
use crate::data::store;
use crate::nav::Navigator;
use crate::ui;

#[derive(Args)]
#[command(after_help = "\
Keys (interactive mode):
  ←/h         Previous week
  →/l         Next week
  t           Back to the current week
  Enter/q     Leave")]
pub struct NavArgs {
    #[arg(long, help = "Start from this schedule position instead of the current week")]
    pub index: Option<usize>,

    #[arg(long, default_value_t = 0, help = "Steps to move back")]
    pub back: usize,

    #[arg(long, default_value_t = 0, help = "Steps to move forward")]
    pub forward: usize,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, conflicts_with = "json", help = "Browse weeks with the keyboard")]
    pub interactive: bool,
}

pub fn run(args: NavArgs, today: NaiveDate) -> Result<()> {
    let config = Config::load()?;
    let schedule = store::load_schedule(&config.schedule_file())?;

    let mut nav = Navigator::new(&schedule.weeks, today).context("Schedule has no weeks")?;

    if let Some(index) = args.index {
        if !nav.jump_to(index) {
            bail!("Week index {index} is out of range or not yet available");
        }
    }
    for _ in 0..args.back {
        if !nav.step_back() {
            debug!("already at the first week");
            break;
        }
    }
    for _ in 0..args.forward {
        if !nav.step_forward() {
            debug!("next week is not available");
            break;
        }
    }

    if args.interactive {
        ui::browse_weeks(&mut nav)?;
    }

    debug!(index = nav.position(), "navigation finished");
    let view = nav.view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let back = if view.back_disabled { " " } else { "<" };
        let forward = if view.forward_disabled { " " } else { ">" };
        println!("{back} {} {forward}", view.label);
    }

    Ok(())
}
