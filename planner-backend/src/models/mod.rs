pub mod content_item;
pub mod note;
pub mod statistics;

pub use content_item::{ContentDraft, ContentItem, PostStatus, Priority};
pub use note::{Note, NoteDraft};
pub use statistics::Statistics;
