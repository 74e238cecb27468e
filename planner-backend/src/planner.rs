//! Planner: owns both stores plus the navigation state the views depend on.

use chrono::{Datelike, Local, NaiveDate};
use std::sync::Arc;

use crate::caption::{CaptionRequest, CaptionSlot, CaptionTicket};
use crate::config::Config;
use crate::db::{Database, KeyValueStore};
use crate::error::ValidationError;
use crate::models::{ContentDraft, ContentItem, Note, Statistics};
use crate::store::{ContentStore, NoteStore};
use crate::views::{self, CalendarCell};

pub struct Planner {
    pub content: ContentStore,
    pub notes: NoteStore,
    /// Month shown by the calendar (year, 1-based month)
    calendar_month: (i32, u32),
    selected_date: Option<NaiveDate>,
    note_query: String,
    caption: CaptionSlot,
}

impl Planner {
    /// Open the planner on the SQLite database named by the config
    pub fn open(config: &Config) -> rusqlite::Result<Self> {
        let db = Arc::new(Database::new(&config.database_url)?);
        Ok(Self::with_storage(db, config, today()))
    }

    /// Open over any key-value store, with `today` as the initial selection
    pub fn with_storage(storage: Arc<dyn KeyValueStore>, config: &Config, today: NaiveDate) -> Self {
        Self {
            content: ContentStore::open(storage.clone(), config.content_storage_key.clone()),
            notes: NoteStore::open(storage, config.notes_storage_key.clone()),
            calendar_month: (today.year(), today.month()),
            selected_date: Some(today),
            note_query: String::new(),
            caption: CaptionSlot::default(),
        }
    }

    // --- Navigation state ---

    pub fn calendar_month(&self) -> (i32, u32) {
        self.calendar_month
    }

    /// Move the calendar forward or back by `offset` months
    pub fn change_month(&mut self, offset: i32) {
        let (year, month) = self.calendar_month;
        self.calendar_month = views::shift_month(year, month, offset);
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn select_date(&mut self, date: Option<NaiveDate>) {
        self.selected_date = date;
    }

    pub fn note_query(&self) -> &str {
        &self.note_query
    }

    pub fn set_note_query(&mut self, query: impl Into<String>) {
        self.note_query = query.into();
    }

    /// A blank draft for the new-post form, dated on the selected day
    pub fn new_content_draft(&self) -> ContentDraft {
        ContentDraft {
            post_date: self
                .selected_date
                .map(|d| d.format(crate::models::content_item::DATE_FORMAT).to_string())
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    // --- Views ---

    pub fn upcoming_tasks(&self, today: NaiveDate) -> Vec<&ContentItem> {
        views::upcoming_tasks(self.content.items(), today)
    }

    pub fn dashboard_preview(&self, today: NaiveDate) -> Vec<&ContentItem> {
        views::dashboard_preview(self.content.items(), today)
    }

    pub fn all_content(&self) -> Vec<&ContentItem> {
        views::all_content_sorted(self.content.items())
    }

    pub fn calendar(&self) -> Vec<CalendarCell> {
        let (year, month) = self.calendar_month;
        views::calendar_grid(year, month, self.content.items()).unwrap_or_default()
    }

    /// Tasks on the selected day; empty when nothing is selected
    pub fn selected_day_tasks(&self) -> Vec<&ContentItem> {
        match self.selected_date {
            Some(date) => views::tasks_for_date(self.content.items(), date),
            None => Vec::new(),
        }
    }

    pub fn filtered_notes(&self) -> Vec<&Note> {
        views::search_notes(self.notes.notes(), &self.note_query)
    }

    pub fn statistics(&self) -> Statistics {
        views::statistics(self.content.items())
    }

    // --- Caption suggestions ---

    pub fn is_generating_caption(&self) -> bool {
        self.caption.is_generating()
    }

    /// Start a caption request for the given form values
    pub fn begin_caption(&mut self, title: &str, project: &str) -> Result<CaptionRequest, ValidationError> {
        let ticket = self.caption.begin();
        CaptionRequest::new(ticket, title, project).inspect_err(|_| self.caption.cancel())
    }

    /// Hand back a generated caption; None if the request is no longer current
    pub fn finish_caption(&mut self, ticket: CaptionTicket, text: String) -> Option<String> {
        self.caption.finish(ticket, text)
    }

    pub fn cancel_caption(&mut self) {
        self.caption.cancel();
    }
}

/// The current local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::{FallbackCaptionGenerator, MISSING_KEY_CAPTION};
    use crate::db::MemoryStore;
    use crate::models::{NoteDraft, PostStatus};
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn planner(today: NaiveDate) -> Planner {
        Planner::with_storage(Arc::new(MemoryStore::new()), &Config::default(), today)
    }

    #[test]
    fn test_seeded_views() {
        let p = planner(date(2026, 2, 17));

        let upcoming: Vec<_> = p.upcoming_tasks(date(2026, 2, 17)).iter().map(|i| i.id.clone()).collect();
        assert_eq!(upcoming, vec!["2", "3", "4", "5", "6"]);
        assert_eq!(p.dashboard_preview(date(2026, 2, 17)).len(), 5);
        assert_eq!(p.all_content().len(), 6);

        let selected = p.selected_day_tasks();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "Course Announcement");
        assert_eq!(p.statistics().posted, 2);
    }

    #[test]
    fn test_calendar_navigation() {
        let mut p = planner(date(2026, 1, 10));
        assert_eq!(p.calendar_month(), (2026, 1));

        p.change_month(1);
        assert_eq!(p.calendar_month(), (2026, 2));
        let cells = p.calendar();
        assert_eq!(cells.len(), 28);
        let day = cells.iter().filter_map(|c| c.day()).find(|d| d.date == date(2026, 2, 16)).unwrap();
        assert_eq!(day.indicators, vec![PostStatus::Posted]);

        p.change_month(-2);
        assert_eq!(p.calendar_month(), (2025, 12));
    }

    #[test]
    fn test_views_follow_mutations() {
        let mut p = planner(date(2026, 3, 1));
        p.select_date(Some(date(2026, 3, 2)));
        assert!(p.selected_day_tasks().is_empty());

        let mut draft = p.new_content_draft();
        assert_eq!(draft.post_date, "2026-03-02");
        draft.title = "Spring Welcome".to_string();
        let item = p.content.create(draft).unwrap();

        assert_eq!(p.selected_day_tasks()[0].id, item.id);
        assert_eq!(p.upcoming_tasks(date(2026, 3, 1)).len(), 1);

        p.select_date(None);
        assert!(p.selected_day_tasks().is_empty());
    }

    #[test]
    fn test_note_filter() {
        let mut p = planner(date(2026, 2, 17));
        p.notes.create(NoteDraft::new("Sync", "discuss budget")).unwrap();
        p.notes.create(NoteDraft::new("Retro", "went well")).unwrap();

        assert_eq!(p.filtered_notes().len(), 2);
        p.set_note_query("BUDGET");
        assert_eq!(p.filtered_notes().len(), 1);
        p.set_note_query("xyz");
        assert!(p.filtered_notes().is_empty());
        p.set_note_query("  ");
        assert_eq!(p.filtered_notes().len(), 2);
    }

    #[tokio::test]
    async fn test_caption_flow() {
        let mut p = planner(date(2026, 2, 17));
        assert!(p.begin_caption("", "Events").is_err());
        assert!(!p.is_generating_caption());

        let request = p.begin_caption("Teaser", "Events").unwrap();
        assert!(p.is_generating_caption());
        let before = p.content.version();

        let text = request.run(&FallbackCaptionGenerator).await;
        assert_eq!(p.finish_caption(request.ticket, text).as_deref(), Some(MISSING_KEY_CAPTION));
        assert!(!p.is_generating_caption());
        assert_eq!(p.content.version(), before);
    }

    #[test]
    fn test_open_sqlite_planner() {
        let dir = tempdir().unwrap();
        let config = Config {
            database_url: dir.path().join("db").join("planner.db").to_string_lossy().to_string(),
            ..Config::default()
        };

        let mut p = Planner::open(&config).expect("Failed to open planner");
        let note = p.notes.create(NoteDraft::new("Sync", "discuss budget")).unwrap();
        drop(p);

        let p = Planner::open(&config).expect("Failed to reopen planner");
        assert_eq!(p.notes.get(&note.id).map(|n| n.title.as_str()), Some("Sync"));
        assert_eq!(p.content.len(), 6);
    }
}
