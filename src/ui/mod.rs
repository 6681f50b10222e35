pub mod navigator;
pub mod prompts;

use anyhow::Result;
use crossterm::terminal;

pub use navigator::browse_weeks;
pub use prompts::{input_date, input_text};

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
