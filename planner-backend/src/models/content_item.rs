//! Planned social-media posts and the draft form they are created from.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

use crate::error::ValidationError;

/// Shown in place of an empty project label.
pub const DEFAULT_PROJECT_LABEL: &str = "General";
/// Shown in place of a missing post time.
pub const ANYTIME_LABEL: &str = "Anytime";

/// Workflow status of a post. Any status may change to any other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, EnumIter,
)]
pub enum PostStatus {
    Posted,
    Ongoing,
    Done,
    #[default]
    #[serde(rename = "Not Started")]
    #[strum(serialize = "Not Started")]
    NotStarted,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Posted => "Posted",
            PostStatus::Ongoing => "Ongoing",
            PostStatus::Done => "Done",
            PostStatus::NotStarted => "Not Started",
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumString, EnumIter,
)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A planned post as it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    #[serde(default)]
    pub project: String,
    pub title: String,
    #[serde(default)]
    pub caption: String,
    /// Link to an attached asset. Uploading is not handled here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_url: Option<String>,
    pub post_date: NaiveDate,
    #[serde(default, with = "clock_time")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub priority: Priority,
}

impl ContentItem {
    /// Project label for display ("General" when empty)
    pub fn project_label(&self) -> &str {
        let trimmed = self.project.trim();
        if trimmed.is_empty() {
            DEFAULT_PROJECT_LABEL
        } else {
            trimmed
        }
    }

    /// Post time for display ("Anytime" when unset)
    pub fn time_label(&self) -> String {
        match self.time {
            Some(t) => clock_time::format(&t),
            None => ANYTIME_LABEL.to_string(),
        }
    }
}

/// Raw form values for a content item, before validation and id assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentDraft {
    pub project: String,
    pub title: String,
    pub caption: String,
    pub static_url: Option<String>,
    /// `YYYY-MM-DD`
    pub post_date: String,
    /// `HH:MM`, empty for anytime
    pub time: String,
    pub status: PostStatus,
    pub priority: Priority,
}

impl ContentDraft {
    /// Prefill a draft from an existing item (the edit form)
    pub fn from_item(item: &ContentItem) -> Self {
        Self {
            project: item.project.clone(),
            title: item.title.clone(),
            caption: item.caption.clone(),
            static_url: item.static_url.clone(),
            post_date: item.post_date.format(DATE_FORMAT).to_string(),
            time: item.time.map(|t| clock_time::format(&t)).unwrap_or_default(),
            status: item.status,
            priority: item.priority,
        }
    }

    /// Validate the draft and build the stored record under `id`.
    pub fn into_item(self, id: String) -> Result<ContentItem, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        let post_date = parse_date(&self.post_date)?;
        let time = match self.time.trim() {
            "" => None,
            raw => Some(
                clock_time::parse(raw).map_err(|_| ValidationError::InvalidTime(raw.to_string()))?,
            ),
        };
        let static_url = self.static_url.filter(|u| !u.trim().is_empty());

        Ok(ContentItem {
            id,
            project: self.project.trim().to_string(),
            title: title.to_string(),
            caption: self.caption,
            static_url,
            post_date,
            time,
            status: self.status,
            priority: self.priority,
        })
    }
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a required `YYYY-MM-DD` date field
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField("postDate"));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

/// `HH:MM` (de)serialization for an optional clock time; absent is stored as "".
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn format(time: &NaiveTime) -> String {
        time.format(FORMAT).to_string()
    }

    pub fn parse(raw: &str) -> chrono::ParseResult<NaiveTime> {
        NaiveTime::parse_from_str(raw.trim(), FORMAT)
    }

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_str(&format(t)),
            None => serializer.serialize_str(""),
        }
    }

    /// Lenient: a value that is not `HH:MM` is dropped rather than failing
    /// the whole record.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => match parse(s) {
                Ok(t) => Ok(Some(t)),
                Err(e) => {
                    log::warn!("[CONTENT] Ignoring unreadable post time '{}': {}", s, e);
                    Ok(None)
                }
            },
        }
    }
}
