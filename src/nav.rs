use chrono::NaiveDate;
use serde::Serialize;

use crate::data::model::WeekDescriptor;
use crate::data::week::{self, WeekRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavState {
    AtFirstWeek,
    MidRange,
    AtLastNavigableWeek,
}

/// What a week picker renders: the selected range and whether each
/// direction is inert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavView {
    pub index: usize,
    pub week: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
    pub back_disabled: bool,
    pub forward_disabled: bool,
    pub state: NavState,
}

/// Steps through a schedule of weeks, never past a disabled one.
pub struct Navigator<'a> {
    weeks: &'a [WeekDescriptor],
    disabled: Vec<bool>,
    home: usize,
    index: usize,
}

impl<'a> Navigator<'a> {
    /// Starts on the week containing `today`. `None` for an empty schedule.
    pub fn new(weeks: &'a [WeekDescriptor], today: NaiveDate) -> Option<Self> {
        let current = week::resolve_current_week(weeks, today)?;
        let index = weeks.iter().position(|w| w.week == current).unwrap_or(0);
        Some(Self {
            weeks,
            disabled: week::disabled_weeks(weeks, today),
            home: index,
            index,
        })
    }

    /// Moves to `index` if it exists and is not disabled.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index < self.weeks.len() && !self.is_disabled(index) {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// Returns to the week the navigator started on.
    pub fn reset(&mut self) {
        self.index = self.home;
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn can_step_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_step_forward(&self) -> bool {
        let next = self.index + 1;
        next < self.weeks.len() && !self.is_disabled(next)
    }

    pub fn step_back(&mut self) -> bool {
        if self.can_step_back() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn step_forward(&mut self) -> bool {
        if self.can_step_forward() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> NavState {
        if !self.can_step_back() {
            NavState::AtFirstWeek
        } else if !self.can_step_forward() {
            NavState::AtLastNavigableWeek
        } else {
            NavState::MidRange
        }
    }

    pub fn range(&self) -> WeekRange {
        let w = &self.weeks[self.index];
        WeekRange {
            start: w.start,
            end: w.end,
        }
    }

    pub fn label(&self) -> String {
        week::format_range_label(self.range())
    }

    pub fn view(&self) -> NavView {
        let range = self.range();
        NavView {
            index: self.index,
            week: self.weeks[self.index].week,
            start: range.start,
            end: range.end,
            label: self.label(),
            back_disabled: !self.can_step_back(),
            forward_disabled: !self.can_step_forward(),
            state: self.state(),
        }
    }

    fn is_disabled(&self, index: usize) -> bool {
        // Flags run out one past the schedule at most; anything beyond is blocked.
        self.disabled.get(index).copied().unwrap_or(true)
    }
}
