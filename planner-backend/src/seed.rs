//! Content shown on first launch, before anything has been saved.

use chrono::{NaiveDate, NaiveTime};

use crate::models::{ContentItem, PostStatus, Priority};

struct SeedItem {
    id: &'static str,
    project: &'static str,
    title: &'static str,
    caption: &'static str,
    date: (i32, u32, u32),
    hour: u32,
    status: PostStatus,
    priority: Priority,
}

const SEED_ITEMS: &[SeedItem] = &[
    SeedItem {
        id: "1",
        project: "Professional Ethics",
        title: "Coming Soon Teaser",
        caption: "Something purposeful is on the horizon...",
        date: (2026, 2, 16),
        hour: 16,
        status: PostStatus::Posted,
        priority: Priority::High,
    },
    SeedItem {
        id: "2",
        project: "Professional Ethics",
        title: "Course Announcement",
        caption: "Join the new ethics module.",
        date: (2026, 2, 17),
        hour: 13,
        status: PostStatus::Posted,
        priority: Priority::Medium,
    },
    SeedItem {
        id: "3",
        project: "TA Recruitment",
        title: "TA Announcement",
        caption: "Application open for Fall.",
        date: (2026, 2, 19),
        hour: 10,
        status: PostStatus::Ongoing,
        priority: Priority::High,
    },
    SeedItem {
        id: "4",
        project: "Events",
        title: "Orientation Photos",
        caption: "Capturing memories.",
        date: (2026, 2, 20),
        hour: 12,
        status: PostStatus::Ongoing,
        priority: Priority::Low,
    },
    SeedItem {
        id: "5",
        project: "Special",
        title: "Mother Language Day",
        caption: "ভাষা কেবল প্রকাশের মাধ্যম নয়...",
        date: (2026, 2, 21),
        hour: 9,
        status: PostStatus::Done,
        priority: Priority::High,
    },
    SeedItem {
        id: "6",
        project: "Video",
        title: "Orientation Reel",
        caption: "Vibes from the orientation.",
        date: (2026, 2, 22),
        hour: 18,
        status: PostStatus::NotStarted,
        priority: Priority::Medium,
    },
];

/// The default content collection
pub fn initial_content() -> Vec<ContentItem> {
    SEED_ITEMS
        .iter()
        .map(|s| {
            let (y, m, d) = s.date;
            ContentItem {
                id: s.id.to_string(),
                project: s.project.to_string(),
                title: s.title.to_string(),
                caption: s.caption.to_string(),
                static_url: None,
                post_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
                time: NaiveTime::from_hms_opt(s.hour, 0, 0),
                status: s.status,
                priority: s.priority,
            }
        })
        .collect()
}
