use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::model::{DayLog, Schedule};

pub fn load_schedule(path: &Path) -> Result<Schedule> {
    load_json(path)
}

pub fn save_schedule(path: &Path, schedule: &Schedule) -> Result<()> {
    validate_schedule(schedule)?;
    write_atomic(path, schedule)
}

pub fn load_days(path: &Path) -> Result<DayLog> {
    load_json(path)
}

pub fn save_days(path: &Path, log: &DayLog) -> Result<()> {
    let mut log = log.clone();
    validate_and_sort_days(&mut log)?;
    write_atomic(path, &log)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let data = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), "loaded");
    Ok(data)
}

fn write_atomic<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize data")?;

    let tmp_path = path.with_extension("json.tmp");

    let mut file = File::create(&tmp_path)
        .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    file.write_all(b"\n")?;
    file.sync_all()
        .with_context(|| format!("Failed to fsync {}", tmp_path.display()))?;
    drop(file);

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    debug!(path = %path.display(), "saved");
    Ok(())
}

fn validate_schedule(schedule: &Schedule) -> Result<()> {
    let mut ordinals = HashSet::new();
    for w in &schedule.weeks {
        if w.start > w.end {
            bail!("Week {} starts {} after it ends {}", w.week, w.start, w.end);
        }
        if !ordinals.insert(w.week) {
            bail!("Duplicate week number {}", w.week);
        }
    }
    Ok(())
}

fn validate_and_sort_days(log: &mut DayLog) -> Result<()> {
    log.days.sort_by(|a, b| a.date.cmp(&b.date));

    for i in 1..log.days.len() {
        if log.days[i].date == log.days[i - 1].date {
            bail!("Duplicate day {}", log.days[i].date);
        }
    }

    Ok(())
}
