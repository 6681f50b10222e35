use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const DAY_DATE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// One navigable week. `start` and `end` are both inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekDescriptor {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub week: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

impl WeekDescriptor {
    pub fn new(start: NaiveDate, end: NaiveDate, week: u32) -> Self {
        Self {
            start,
            end,
            week,
            month: None,
        }
    }

    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// One day of logged time as recorded by the attendance source.
///
/// `date` is kept as text: entries whose date does not parse are still
/// loaded, they simply never fall inside any week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub date: String,
    pub hours: String,
    pub day_of_week: String,
    #[serde(default)]
    pub disable: bool,
}

impl DayEntry {
    pub fn new(date: NaiveDate, hours: ClockDuration) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            hours: hours.to_string(),
            day_of_week: date.format("%a").to_string(),
            disable: false,
        }
    }

    /// Date-only values resolve to midnight.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self.date.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0);
        }
        DAY_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }

    pub fn duration(&self) -> Option<ClockDuration> {
        self.hours.parse().ok()
    }
}

/// A week that received at least one day. `week` is the dense output
/// position, not the ordinal of the source descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBucket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub week: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<DayEntry>,
}

impl WeekBucket {
    /// Days with unreadable hours count as zero; the sum saturates.
    pub fn total(&self) -> ClockDuration {
        let minutes = self
            .days
            .iter()
            .filter_map(DayEntry::duration)
            .fold(0u32, |acc, d| acc.saturating_add(d.minutes));
        ClockDuration { minutes }
    }
}

/// Clock-style duration such as `07:30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ClockDuration {
    pub minutes: u32,
}

impl ClockDuration {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self {
            minutes: hours.saturating_mul(60).saturating_add(minutes),
        }
    }
}

impl FromStr for ClockDuration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || anyhow::anyhow!("Invalid duration '{}'. Expected HH:MM, e.g. 07:30", s);
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || m.len() != 2 {
            return Err(invalid());
        }
        let hours: u32 = h.parse().map_err(|_| invalid())?;
        let minutes: u32 = m.parse().map_err(|_| invalid())?;
        if minutes >= 60 {
            return Err(invalid());
        }
        let total = hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .ok_or_else(invalid)?;
        Ok(Self { minutes: total })
    }
}

impl fmt::Display for ClockDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    pub weeks: Vec<WeekDescriptor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayLog {
    pub days: Vec<DayEntry>,
}

impl DayLog {
    pub fn new() -> Self {
        Self { days: Vec::new() }
    }

    /// Replaces the entry for the same date, otherwise appends.
    pub fn upsert(&mut self, entry: DayEntry) {
        match self.days.iter_mut().find(|d| d.date == entry.date) {
            Some(existing) => *existing = entry,
            None => self.days.push(entry),
        }
    }
}
