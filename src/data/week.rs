use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;
use tracing::debug;

use super::model::{DayEntry, WeekBucket, WeekDescriptor};

/// Literal boundary dates of one selected week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// `None` when the week would run past the representable calendar.
pub fn week_containing(date: NaiveDate, week_start: Weekday) -> Option<(NaiveDate, NaiveDate)> {
    let offset = (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    let start = date.checked_sub_days(Days::new(u64::from(offset)))?;
    let end = start.checked_add_days(Days::new(6))?;
    Some((start, end))
}

/// Contiguous 7-day weeks from the week containing `from` through the week
/// containing `to`, numbered densely from 0. Generation stops at the edge
/// of the calendar.
pub fn generate_weeks(from: NaiveDate, to: NaiveDate, week_start: Weekday) -> Vec<WeekDescriptor> {
    let mut weeks = Vec::new();
    let Some((mut start, mut end)) = week_containing(from, week_start) else {
        return weeks;
    };
    let mut ordinal = 0;
    while start <= to {
        weeks.push(WeekDescriptor::new(start, end, ordinal).with_month(month_label(start)));
        ordinal += 1;
        match (
            start.checked_add_days(Days::new(7)),
            end.checked_add_days(Days::new(7)),
        ) {
            (Some(next_start), Some(next_end)) => {
                start = next_start;
                end = next_end;
            }
            _ => break,
        }
    }
    weeks
}

fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Ordinal of the first week whose days include `today`, or of the first
/// supplied week when none does. `None` only for an empty list.
pub fn resolve_current_week(weeks: &[WeekDescriptor], today: NaiveDate) -> Option<u32> {
    let now = today.and_time(NaiveTime::MIN);
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?;

    let found = weeks.iter().find(|w| {
        let start = w.start.and_time(NaiveTime::MIN);
        let end = w.end.and_time(end_of_day);
        start <= now && now <= end
    });

    match found {
        Some(w) => Some(w.week),
        None => {
            let first = weeks.first()?;
            debug!(%today, fallback = first.week, "today is outside every week");
            Some(first.week)
        }
    }
}

/// `true` for every week that starts after `today`. When nothing is
/// disabled a trailing `true` is appended so stepping past the last week
/// stays blocked.
pub fn disabled_weeks(weeks: &[WeekDescriptor], today: NaiveDate) -> Vec<bool> {
    let mut disabled: Vec<bool> = weeks.iter().map(|w| w.start > today).collect();
    if !disabled.iter().any(|d| *d) {
        disabled.push(true);
    }
    disabled
}

pub fn week_range(weeks: &[WeekDescriptor], index: usize) -> Option<WeekRange> {
    weeks.get(index).map(|w| WeekRange {
        start: w.start,
        end: w.end,
    })
}

pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

pub fn format_year(date: NaiveDate) -> String {
    date.format("%Y").to_string()
}

pub fn format_range_label(range: WeekRange) -> String {
    format!(
        "{} - {}, {}",
        format_short_date(range.start),
        format_short_date(range.end),
        format_year(range.end)
    )
}

/// Groups `days` under the weeks that contain them.
///
/// Weeks are visited in input order; a week with no matching day is
/// dropped and does not consume an output ordinal. Days whose date cannot
/// be read never match.
pub fn aggregate_days(days: &[DayEntry], weeks: &[WeekDescriptor]) -> Vec<WeekBucket> {
    let stamped: Vec<_> = days
        .iter()
        .map(|d| {
            let ts = d.timestamp();
            if ts.is_none() {
                debug!(date = %d.date, "skipping day with unreadable date");
            }
            (d, ts)
        })
        .collect();

    let mut buckets = Vec::new();
    let mut next_week = 0;
    for w in weeks {
        let start = w.start.and_time(NaiveTime::MIN);
        let end = w.end.and_time(NaiveTime::MIN);
        let matching: Vec<DayEntry> = stamped
            .iter()
            .filter(|(_, ts)| matches!(ts, Some(ts) if start <= *ts && *ts <= end))
            .map(|(d, _)| (*d).clone())
            .collect();

        if matching.is_empty() {
            continue;
        }
        buckets.push(WeekBucket {
            month: w.month.clone(),
            week: next_week,
            start: w.start,
            end: w.end,
            days: matching,
        });
        next_week += 1;
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn week(start: NaiveDate, ordinal: u32) -> WeekDescriptor {
        WeekDescriptor::new(start, start + Duration::days(6), ordinal)
    }

    fn day(raw: &str) -> DayEntry {
        DayEntry {
            date: raw.to_string(),
            hours: "07:30".to_string(),
            day_of_week: "Wed".to_string(),
            disable: false,
        }
    }

    fn november() -> Vec<WeekDescriptor> {
        vec![week(date(2024, 11, 11), 0), week(date(2024, 11, 18), 1)]
    }

    #[test]
    fn test_week_containing_monday_start() {
        let (start, end) = week_containing(date(2024, 11, 20), Weekday::Mon).unwrap();
        assert_eq!(start, date(2024, 11, 18));
        assert_eq!(end, date(2024, 11, 24));
    }

    #[test]
    fn test_week_containing_on_boundaries() {
        assert_eq!(
            week_containing(date(2024, 11, 18), Weekday::Mon).unwrap().0,
            date(2024, 11, 18)
        );
        assert_eq!(
            week_containing(date(2024, 11, 24), Weekday::Mon).unwrap().0,
            date(2024, 11, 18)
        );
    }

    #[test]
    fn test_week_containing_sunday_start() {
        let (start, end) = week_containing(date(2024, 11, 20), Weekday::Sun).unwrap();
        assert_eq!(start, date(2024, 11, 17));
        assert_eq!(end, date(2024, 11, 23));
        assert_eq!(start.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_generate_weeks_aligns_and_numbers() {
        let weeks = generate_weeks(date(2024, 11, 13), date(2024, 12, 2), Weekday::Mon);
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0].start, date(2024, 11, 11));
        assert_eq!(weeks[3].start, date(2024, 12, 2));
        for (i, w) in weeks.iter().enumerate() {
            assert_eq!(w.week, i as u32);
            assert_eq!(w.start.weekday(), Weekday::Mon);
            assert_eq!(w.end - w.start, Duration::days(6));
        }
        assert_eq!(weeks[0].month.as_deref(), Some("November 2024"));
        assert_eq!(weeks[3].month.as_deref(), Some("December 2024"));
    }

    #[test]
    fn test_generate_weeks_single() {
        let weeks = generate_weeks(date(2024, 11, 18), date(2024, 11, 18), Weekday::Mon);
        assert_eq!(weeks.len(), 1);
    }

    #[test]
    fn test_generate_weeks_to_before_from() {
        let weeks = generate_weeks(date(2024, 11, 18), date(2024, 11, 1), Weekday::Mon);
        assert!(weeks.is_empty());
    }

    #[test]
    fn test_week_containing_at_calendar_edges() {
        let max = NaiveDate::MAX;
        assert!(week_containing(max, max.weekday()).is_none());
        assert_eq!(
            week_containing(max, max.weekday().succ()),
            Some((max - Duration::days(6), max))
        );

        let min = NaiveDate::MIN;
        assert!(week_containing(min, min.weekday().succ()).is_none());
        assert!(generate_weeks(min, min + Duration::days(30), min.weekday().succ()).is_empty());
    }

    #[test]
    fn test_generate_weeks_stops_at_calendar_end() {
        let from = NaiveDate::MAX - Duration::days(20);
        let weeks = generate_weeks(from, NaiveDate::MAX, Weekday::Mon);
        assert!(!weeks.is_empty());
        assert!(weeks.len() <= 4);
        for pair in weeks.windows(2) {
            assert_eq!(pair[1].start - pair[0].start, Duration::days(7));
        }
        assert!(weeks.last().unwrap().end <= NaiveDate::MAX);
    }

    #[test]
    fn test_generate_weeks_near_calendar_start() {
        let from = NaiveDate::MIN + Duration::days(2);
        let weeks = generate_weeks(from, from + Duration::days(14), Weekday::Mon);
        for w in &weeks {
            assert_eq!(w.end - w.start, Duration::days(6));
        }
    }

    #[test]
    fn test_resolve_finds_containing_week() {
        assert_eq!(resolve_current_week(&november(), date(2024, 11, 20)), Some(1));
        assert_eq!(resolve_current_week(&november(), date(2024, 11, 11)), Some(0));
    }

    #[test]
    fn test_resolve_end_day_is_inclusive() {
        assert_eq!(resolve_current_week(&november(), date(2024, 11, 17)), Some(0));
        assert_eq!(resolve_current_week(&november(), date(2024, 11, 24)), Some(1));
    }

    #[test]
    fn test_resolve_falls_back_to_first_supplied() {
        let mut weeks = november();
        weeks.reverse();
        assert_eq!(resolve_current_week(&weeks, date(2025, 3, 1)), Some(1));
        assert_eq!(resolve_current_week(&weeks, date(2024, 1, 1)), Some(1));
    }

    #[test]
    fn test_resolve_order_independent() {
        let mut weeks = november();
        weeks.reverse();
        assert_eq!(resolve_current_week(&weeks, date(2024, 11, 13)), Some(0));
    }

    #[test]
    fn test_resolve_overlap_first_wins() {
        let weeks = vec![week(date(2024, 11, 18), 7), week(date(2024, 11, 17), 3)];
        assert_eq!(resolve_current_week(&weeks, date(2024, 11, 20)), Some(7));
    }

    #[test]
    fn test_resolve_empty() {
        assert_eq!(resolve_current_week(&[], date(2024, 11, 20)), None);
    }

    #[test]
    fn test_disabled_all_past_appends_guard() {
        assert_eq!(
            disabled_weeks(&november(), date(2024, 11, 20)),
            vec![false, false, true]
        );
    }

    #[test]
    fn test_disabled_future_week_no_guard() {
        let disabled = disabled_weeks(&november(), date(2024, 11, 13));
        assert_eq!(disabled, vec![false, true]);
    }

    #[test]
    fn test_disabled_start_today_is_enabled() {
        let disabled = disabled_weeks(&november(), date(2024, 11, 18));
        assert_eq!(disabled, vec![false, false, true]);
    }

    #[test]
    fn test_disabled_empty_input() {
        assert_eq!(disabled_weeks(&[], date(2024, 11, 20)), vec![true]);
    }

    #[test]
    fn test_week_range_in_bounds() {
        let weeks = november();
        let range = week_range(&weeks, 1).unwrap();
        assert_eq!(range.start, weeks[1].start);
        assert_eq!(range.end, weeks[1].end);
    }

    #[test]
    fn test_week_range_out_of_bounds() {
        assert!(week_range(&november(), 2).is_none());
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_short_date(date(2024, 11, 8)), "Nov 8");
        assert_eq!(format_short_date(date(2024, 11, 18)), "Nov 18");
        assert_eq!(format_year(date(2024, 11, 18)), "2024");
        let range = WeekRange {
            start: date(2024, 12, 30),
            end: date(2025, 1, 5),
        };
        assert_eq!(format_range_label(range), "Dec 30 - Jan 5, 2025");
    }

    #[test]
    fn test_aggregate_single_day_scenario() {
        let buckets = aggregate_days(&[day("2024-11-20")], &november());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].week, 0);
        assert_eq!(buckets[0].start, date(2024, 11, 18));
        assert_eq!(buckets[0].end, date(2024, 11, 24));
        assert_eq!(buckets[0].days, vec![day("2024-11-20")]);
    }

    #[test]
    fn test_aggregate_renumbers_densely() {
        let weeks = vec![
            week(date(2024, 11, 4), 10),
            week(date(2024, 11, 11), 11),
            week(date(2024, 11, 18), 12),
        ];
        let days = vec![day("2024-11-05"), day("2024-11-19"), day("2024-11-06")];
        let buckets = aggregate_days(&days, &weeks);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].week, 0);
        assert_eq!(buckets[1].week, 1);
        assert_eq!(buckets[0].days, vec![day("2024-11-05"), day("2024-11-06")]);
        assert_eq!(buckets[1].days, vec![day("2024-11-19")]);
        assert!(buckets.iter().all(|b| !b.days.is_empty()));
    }

    #[test]
    fn test_aggregate_follows_input_order() {
        let weeks = vec![week(date(2024, 11, 18), 1), week(date(2024, 11, 11), 0)];
        let days = vec![day("2024-11-12"), day("2024-11-20")];
        let buckets = aggregate_days(&days, &weeks);
        assert_eq!(buckets[0].start, date(2024, 11, 18));
        assert_eq!(buckets[0].week, 0);
        assert_eq!(buckets[1].start, date(2024, 11, 11));
        assert_eq!(buckets[1].week, 1);
    }

    #[test]
    fn test_aggregate_carries_month() {
        let weeks = vec![week(date(2024, 11, 18), 4).with_month("November")];
        let buckets = aggregate_days(&[day("2024-11-18")], &weeks);
        assert_eq!(buckets[0].month.as_deref(), Some("November"));
    }

    #[test]
    fn test_aggregate_time_component_past_end_is_excluded() {
        let days = vec![day("2024-11-24T10:00:00"), day("2024-11-24")];
        let buckets = aggregate_days(&days, &november());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].days, vec![day("2024-11-24")]);
    }

    #[test]
    fn test_aggregate_omits_malformed_dates() {
        let days = vec![day("not-a-date"), day("2024-02-30")];
        assert!(aggregate_days(&days, &november()).is_empty());
    }

    #[test]
    fn test_aggregate_empty_inputs() {
        assert!(aggregate_days(&[], &november()).is_empty());
        assert!(aggregate_days(&[day("2024-11-20")], &[]).is_empty());
    }
}
