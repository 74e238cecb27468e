use serde::Serialize;

use super::{ContentItem, PostStatus};

/// Per-status counts over the content collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub posted: usize,
    pub ongoing: usize,
    pub done: usize,
    pub not_started: usize,
}

impl Statistics {
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a ContentItem>) -> Self {
        items.into_iter().fold(Self::default(), |mut stats, item| {
            stats.total += 1;
            match item.status {
                PostStatus::Posted => stats.posted += 1,
                PostStatus::Ongoing => stats.ongoing += 1,
                PostStatus::Done => stats.done += 1,
                PostStatus::NotStarted => stats.not_started += 1,
            }
            stats
        })
    }
}
