//! Derived views over the content and note collections.
//!
//! Every function here is pure: it borrows the current collection and returns
//! a freshly computed sequence. Nothing is cached, and none of these values
//! are ever written back to a store.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{ContentItem, Note, PostStatus, Statistics};

/// Number of upcoming tasks shown on the dashboard
pub const DASHBOARD_PREVIEW_LIMIT: usize = 5;
/// Status dots shown per calendar day
pub const MAX_DAY_INDICATORS: usize = 3;

/// Missing times order as midnight. Only used for sorting.
fn time_or_midnight(time: Option<NaiveTime>) -> NaiveTime {
    time.unwrap_or_default()
}

fn schedule_key(item: &ContentItem) -> (NaiveDate, NaiveTime) {
    (item.post_date, time_or_midnight(item.time))
}

/// Items due today or later, ordered by date then time.
///
/// Anything dated today counts, whatever its time. Ties keep collection order.
pub fn upcoming_tasks(items: &[ContentItem], today: NaiveDate) -> Vec<&ContentItem> {
    let mut upcoming: Vec<&ContentItem> = items.iter().filter(|i| i.post_date >= today).collect();
    upcoming.sort_by_key(|i| schedule_key(i));
    upcoming
}

/// The first few upcoming tasks, for the dashboard
pub fn dashboard_preview(items: &[ContentItem], today: NaiveDate) -> Vec<&ContentItem> {
    let mut upcoming = upcoming_tasks(items, today);
    upcoming.truncate(DASHBOARD_PREVIEW_LIMIT);
    upcoming
}

/// The whole collection ordered by date then time, past items included
pub fn all_content_sorted(items: &[ContentItem]) -> Vec<&ContentItem> {
    let mut all: Vec<&ContentItem> = items.iter().collect();
    all.sort_by_key(|i| schedule_key(i));
    all
}

/// Items scheduled on exactly `date`, ordered by time (anytime first)
pub fn tasks_for_date(items: &[ContentItem], date: NaiveDate) -> Vec<&ContentItem> {
    let mut tasks: Vec<&ContentItem> = items.iter().filter(|i| i.post_date == date).collect();
    tasks.sort_by_key(|i| time_or_midnight(i.time));
    tasks
}

/// Notes whose title or content contains `query`, ignoring case.
///
/// A blank query returns every note. Order follows the collection.
pub fn search_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    if query.trim().is_empty() {
        return notes.iter().collect();
    }
    let needle = query.to_lowercase();
    notes.iter().filter(|n| n.matches(&needle)).collect()
}

pub fn statistics(items: &[ContentItem]) -> Statistics {
    Statistics::from_items(items)
}

// --- Calendar ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    /// Padding before the first day of the month
    Empty,
    Day(CalendarDay),
}

impl CalendarCell {
    pub fn day(&self) -> Option<&CalendarDay> {
        match self {
            CalendarCell::Day(day) => Some(day),
            CalendarCell::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// All tasks on this day, not just the ones with indicators
    pub task_count: usize,
    /// Statuses of the first few tasks in collection order
    pub indicators: Vec<PostStatus>,
}

/// Dot color for a status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorTone {
    Green,
    Amber,
    Blue,
}

pub fn indicator_tone(status: PostStatus) -> IndicatorTone {
    match status {
        PostStatus::Posted => IndicatorTone::Green,
        PostStatus::Ongoing => IndicatorTone::Amber,
        PostStatus::Done | PostStatus::NotStarted => IndicatorTone::Blue,
    }
}

/// Move `offset` months from (year, month). Month is 1-based.
pub fn shift_month(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + offset;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Number of days in a month, or None for an invalid month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = shift_month(year, month, 1);
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    u32::try_from(next_first.signed_duration_since(first).num_days()).ok()
}

/// Month grid starting on Sunday: one `Empty` per weekday before the 1st,
/// then one `Day` per date. Returns None for an invalid month.
pub fn calendar_grid(year: i32, month: u32, items: &[ContentItem]) -> Option<Vec<CalendarCell>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let day_count = days_in_month(year, month)?;
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut by_date: HashMap<NaiveDate, Vec<PostStatus>> = HashMap::new();
    for item in items {
        if item.post_date.year() == year && item.post_date.month() == month {
            by_date.entry(item.post_date).or_default().push(item.status);
        }
    }

    let mut cells = Vec::with_capacity(leading + day_count as usize);
    cells.extend(std::iter::repeat_n(CalendarCell::Empty, leading));

    for date in first.iter_days().take(day_count as usize) {
        let statuses = by_date.remove(&date).unwrap_or_default();
        cells.push(CalendarCell::Day(CalendarDay {
            date,
            task_count: statuses.len(),
            indicators: statuses.into_iter().take(MAX_DAY_INDICATORS).collect(),
        }));
    }

    Some(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use crate::seed;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(id: &str, post_date: NaiveDate, time: Option<(u32, u32)>, status: PostStatus) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            project: String::new(),
            title: format!("Post {}", id),
            caption: String::new(),
            static_url: None,
            post_date,
            time: time.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            status,
            priority: Priority::Medium,
        }
    }

    fn note(id: &str, title: &str, content: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap(),
        }
    }

    fn ids<'a>(items: &[&'a ContentItem]) -> Vec<&'a str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_upcoming_excludes_past_days() {
        let items = vec![
            item("a", date(2026, 2, 16), None, PostStatus::Posted),
            item("b", date(2026, 2, 17), None, PostStatus::Posted),
        ];
        let upcoming = upcoming_tasks(&items, date(2026, 2, 17));
        assert_eq!(ids(&upcoming), vec!["b"]);
    }

    #[test]
    fn test_upcoming_keeps_earlier_today_and_sorts() {
        let today = date(2026, 2, 17);
        let items = vec![
            item("late", date(2026, 2, 20), Some((9, 0)), PostStatus::Ongoing),
            item("morning", today, Some((1, 0)), PostStatus::Ongoing),
            item("anytime", date(2026, 2, 20), None, PostStatus::Ongoing),
            item("evening", today, Some((23, 30)), PostStatus::Ongoing),
            item("past", date(2026, 1, 1), Some((9, 0)), PostStatus::Ongoing),
        ];
        let upcoming = upcoming_tasks(&items, today);
        assert_eq!(ids(&upcoming), vec!["morning", "evening", "anytime", "late"]);
    }

    #[test]
    fn test_upcoming_ties_keep_collection_order() {
        let d = date(2026, 3, 1);
        let items = vec![
            item("first", d, Some((10, 0)), PostStatus::Done),
            item("midnight", d, Some((0, 0)), PostStatus::Done),
            item("second", d, Some((10, 0)), PostStatus::Done),
            item("anytime", d, None, PostStatus::Done),
        ];
        let upcoming = upcoming_tasks(&items, d);
        assert_eq!(ids(&upcoming), vec!["midnight", "anytime", "first", "second"]);
    }

    #[test]
    fn test_upcoming_contains_each_future_item_once_in_order() {
        let items = seed::initial_content();
        let today = date(2026, 2, 19);
        let upcoming = upcoming_tasks(&items, today);

        let expected = items.iter().filter(|i| i.post_date >= today).count();
        assert_eq!(upcoming.len(), expected);
        assert!(upcoming.windows(2).all(|w| schedule_key(w[0]) <= schedule_key(w[1])));
    }

    #[test]
    fn test_dashboard_preview_is_capped() {
        let d = date(2026, 5, 1);
        let items: Vec<_> = (0..8)
            .map(|n| item(&n.to_string(), d, Some((n, 0)), PostStatus::NotStarted))
            .collect();
        assert_eq!(dashboard_preview(&items, d).len(), DASHBOARD_PREVIEW_LIMIT);
    }

    #[test]
    fn test_all_content_sorted_includes_past() {
        let items = vec![
            item("b", date(2026, 2, 17), Some((13, 0)), PostStatus::Posted),
            item("a", date(2025, 12, 31), None, PostStatus::Posted),
        ];
        assert_eq!(ids(&all_content_sorted(&items)), vec!["a", "b"]);
    }

    #[test]
    fn test_tasks_for_date_sorted_by_time() {
        let d = date(2026, 2, 21);
        let items = vec![
            item("noon", d, Some((12, 0)), PostStatus::Done),
            item("other-day", date(2026, 2, 22), Some((1, 0)), PostStatus::Done),
            item("anytime", d, None, PostStatus::Done),
            item("nine", d, Some((9, 0)), PostStatus::Done),
        ];
        assert_eq!(ids(&tasks_for_date(&items, d)), vec!["anytime", "nine", "noon"]);
        assert!(tasks_for_date(&items, date(2026, 2, 23)).is_empty());
    }

    #[test]
    fn test_calendar_grid_shape() {
        // February 2026 starts on a Sunday
        let grid = calendar_grid(2026, 2, &[]).unwrap();
        assert_eq!(grid.len(), 28);
        assert_eq!(grid[0].day().unwrap().date, date(2026, 2, 1));

        // April 2026 starts on a Wednesday
        let grid = calendar_grid(2026, 4, &[]).unwrap();
        assert_eq!(grid.iter().take_while(|c| **c == CalendarCell::Empty).count(), 3);
        assert_eq!(grid.iter().filter(|c| c.day().is_some()).count(), 30);
        assert_eq!(grid.last().unwrap().day().unwrap().date, date(2026, 4, 30));
    }

    #[test]
    fn test_calendar_grid_leap_february() {
        // February 2024 starts on a Thursday
        let grid = calendar_grid(2024, 2, &[]).unwrap();
        assert_eq!(grid.iter().take_while(|c| c.day().is_none()).count(), 4);
        assert_eq!(grid.iter().filter(|c| c.day().is_some()).count(), 29);
        assert_eq!(days_in_month(2026, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
    }

    #[test]
    fn test_calendar_grid_all_months() {
        for year in [1999, 2024, 2025, 2026, 2100] {
            for month in 1..=12 {
                let grid = calendar_grid(year, month, &[]).unwrap();
                let first = date(year, month, 1);
                let leading = first.weekday().num_days_from_sunday() as usize;
                let days = days_in_month(year, month).unwrap() as usize;

                assert_eq!(grid.len(), leading + days);
                assert!(grid[..leading].iter().all(|c| *c == CalendarCell::Empty));
                for (n, cell) in grid[leading..].iter().enumerate() {
                    assert_eq!(cell.day().unwrap().date.day() as usize, n + 1);
                }
            }
        }
    }

    #[test]
    fn test_calendar_grid_rejects_invalid_month() {
        assert!(calendar_grid(2026, 0, &[]).is_none());
        assert!(calendar_grid(2026, 13, &[]).is_none());
    }

    #[test]
    fn test_calendar_indicators_capped_at_three() {
        let d = date(2026, 2, 19);
        let items = vec![
            item("1", d, None, PostStatus::Posted),
            item("2", d, None, PostStatus::Ongoing),
            item("x", date(2026, 3, 19), None, PostStatus::Posted),
            item("3", d, None, PostStatus::Done),
            item("4", d, None, PostStatus::NotStarted),
        ];
        let grid = calendar_grid(2026, 2, &items).unwrap();
        let day = grid.iter().filter_map(|c| c.day()).find(|day| day.date == d).unwrap();

        assert_eq!(day.task_count, 4);
        assert_eq!(day.indicators, vec![PostStatus::Posted, PostStatus::Ongoing, PostStatus::Done]);

        let quiet = grid.iter().filter_map(|c| c.day()).find(|day| day.date == date(2026, 2, 20)).unwrap();
        assert_eq!(quiet.task_count, 0);
        assert!(quiet.indicators.is_empty());
    }

    #[test]
    fn test_indicator_tones() {
        assert_eq!(indicator_tone(PostStatus::Posted), IndicatorTone::Green);
        assert_eq!(indicator_tone(PostStatus::Ongoing), IndicatorTone::Amber);
        assert_eq!(indicator_tone(PostStatus::Done), IndicatorTone::Blue);
        assert_eq!(indicator_tone(PostStatus::NotStarted), IndicatorTone::Blue);
    }

    #[test]
    fn test_shift_month_wraps_years() {
        assert_eq!(shift_month(2026, 1, -1), (2025, 12));
        assert_eq!(shift_month(2026, 12, 1), (2027, 1));
        assert_eq!(shift_month(2026, 2, 0), (2026, 2));
        assert_eq!(shift_month(2026, 2, -14), (2024, 12));
    }

    #[test]
    fn test_search_notes() {
        let notes = vec![
            note("1", "Sync", "discuss budget"),
            note("2", "Budget review", "numbers"),
            note("3", "Retro", "went well"),
        ];

        let hits: Vec<_> = search_notes(&notes, "BUDGET").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(hits, vec!["1", "2"]);
        assert!(search_notes(&notes, "xyz").is_empty());

        assert_eq!(search_notes(&notes, "").len(), 3);
        let all: Vec<_> = search_notes(&notes, "   ").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(all, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_statistics() {
        let stats = statistics(&seed::initial_content());
        assert_eq!(stats.total, 6);
        assert_eq!(stats.posted, 2);
        assert_eq!(stats.ongoing, 2);
        assert_eq!(stats.done, 1);
        assert_eq!(stats.not_started, 1);
    }
}
