use std::env;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Storage key for the content collection. Bump the version suffix to
    /// abandon an incompatible layout instead of migrating it.
    pub const CONTENT_STORAGE_KEY: &str = "CONTENT_STORAGE_KEY";
    pub const NOTES_STORAGE_KEY: &str = "NOTES_STORAGE_KEY";
    /// Optional. Caption generation falls back to placeholder text without it.
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    pub const GEMINI_API_URL: &str = "GEMINI_API_URL";
    /// Organization named in the caption prompt.
    pub const CAPTION_ORGANIZATION: &str = "CAPTION_ORGANIZATION";
}

/// Default values
pub mod defaults {
    pub const DATABASE_URL: &str = "./.db/planner.db";
    pub const CONTENT_STORAGE_KEY: &str = "nsu_content_calendar_v2";
    pub const NOTES_STORAGE_KEY: &str = "nsu_content_notes";
    pub const GEMINI_MODEL: &str = "gemini-3-flash-preview";
    pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const CAPTION_ORGANIZATION: &str =
        "North South University Department of History and Philosophy";
    /// Project label sent with caption requests when the draft has none.
    pub const CAPTION_PROJECT_LABEL: &str = "History & Philosophy";
}

/// Get the caption API key from environment, ignoring blank values
pub fn gemini_api_key() -> Option<String> {
    env::var(env_vars::GEMINI_API_KEY)
        .ok()
        .filter(|k| !k.trim().is_empty())
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub content_storage_key: String,
    pub notes_storage_key: String,
    pub caption: CaptionConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var(env_vars::DATABASE_URL)
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
            content_storage_key: env::var(env_vars::CONTENT_STORAGE_KEY)
                .unwrap_or_else(|_| defaults::CONTENT_STORAGE_KEY.to_string()),
            notes_storage_key: env::var(env_vars::NOTES_STORAGE_KEY)
                .unwrap_or_else(|_| defaults::NOTES_STORAGE_KEY.to_string()),
            caption: CaptionConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: defaults::DATABASE_URL.to_string(),
            content_storage_key: defaults::CONTENT_STORAGE_KEY.to_string(),
            notes_storage_key: defaults::NOTES_STORAGE_KEY.to_string(),
            caption: CaptionConfig::default(),
        }
    }
}

/// Configuration for the caption generation client
#[derive(Clone, Debug)]
pub struct CaptionConfig {
    /// None disables remote calls entirely (fallback text is returned)
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub organization: String,
}

impl CaptionConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: gemini_api_key(),
            model: env::var(env_vars::GEMINI_MODEL)
                .unwrap_or_else(|_| defaults::GEMINI_MODEL.to_string()),
            api_url: env::var(env_vars::GEMINI_API_URL)
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| defaults::GEMINI_API_URL.to_string()),
            organization: env::var(env_vars::CAPTION_ORGANIZATION)
                .unwrap_or_else(|_| defaults::CAPTION_ORGANIZATION.to_string()),
        }
    }
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: defaults::GEMINI_MODEL.to_string(),
            api_url: defaults::GEMINI_API_URL.to_string(),
            organization: defaults::CAPTION_ORGANIZATION.to_string(),
        }
    }
}
