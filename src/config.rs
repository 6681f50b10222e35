use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub start_date: NaiveDate,
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
    /// Future weeks kept in the schedule beyond the one containing today.
    #[serde(default = "default_lookahead_weeks")]
    pub lookahead_weeks: u32,
}

impl CalendarConfig {
    /// Last day the schedule has to reach so that `today` keeps its lookahead.
    pub fn horizon(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.lookahead_weeks) * 7))
            .unwrap_or(NaiveDate::MAX)
    }
}

fn default_week_start() -> Weekday {
    Weekday::Mon
}

fn default_lookahead_weeks() -> u32 {
    4
}

impl Config {
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var("WEEKS_CONFIG_DIR") {
            PathBuf::from(dir)
        } else {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("~/.config"))
                .join("weeks")
        }
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            anyhow::bail!("Configuration not found. Run `weeks init` to set up.");
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if let Ok(data_dir) = env::var("WEEKS_DATA_DIR") {
            config.data.directory = data_dir;
        }

        config.data.directory = expand_tilde(&config.data.directory);

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.directory)
    }

    pub fn schedule_file(&self) -> PathBuf {
        self.data_dir().join("schedule.json")
    }

    pub fn days_file(&self) -> PathBuf {
        self.data_dir().join("days.json")
    }
}

/// `WEEKS_TODAY` pins the date every command treats as today.
pub fn today_override() -> Result<Option<NaiveDate>> {
    match env::var("WEEKS_TODAY") {
        Ok(raw) => {
            let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| format!("Invalid WEEKS_TODAY: {raw}"))?;
            Ok(Some(date))
        }
        Err(_) => Ok(None),
    }
}

fn expand_tilde(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}
