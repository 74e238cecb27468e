//! Caption suggestions from a remote language model.
//!
//! Generation never fails from the caller's point of view: a missing API key,
//! a transport error or an empty reply all resolve to fixed fallback text.
//! Results are only proposed for the caption field; nothing here touches a
//! store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{defaults, CaptionConfig};
use crate::error::ValidationError;
use crate::models::ContentItem;

pub const MISSING_KEY_CAPTION: &str = "API Key missing. Check .env.local";
pub const EMPTY_CAPTION: &str = "Could not generate caption.";
pub const FAILED_CAPTION: &str = "Error generating caption. Please try again.";
pub const MISSING_KEY_SCHEDULE: &str = "API Key missing.";
pub const FAILED_SCHEDULE: &str = "Error suggesting a schedule. Please try again.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[async_trait]
pub trait CaptionGenerator: Send + Sync {
    /// Suggest a caption for a post. Always returns displayable text.
    async fn generate_caption(&self, title: &str, project: &str) -> String;

    /// Suggest a posting time for the next post given the existing ones
    async fn suggest_schedule(&self, posts: &[ContentItem]) -> String;
}

/// Build the generator for this config: the remote client when a key is set,
/// otherwise the offline fallback.
pub fn generator_from_config(config: &CaptionConfig) -> Box<dyn CaptionGenerator> {
    if config.api_key.is_some() {
        Box::new(GeminiCaptionClient::new(config.clone()))
    } else {
        log::info!("[CAPTION] No API key configured, caption suggestions disabled");
        Box::new(FallbackCaptionGenerator)
    }
}

/// Used when no credential is configured
pub struct FallbackCaptionGenerator;

#[async_trait]
impl CaptionGenerator for FallbackCaptionGenerator {
    async fn generate_caption(&self, _title: &str, _project: &str) -> String {
        MISSING_KEY_CAPTION.to_string()
    }

    async fn suggest_schedule(&self, _posts: &[ContentItem]) -> String {
        MISSING_KEY_SCHEDULE.to_string()
    }
}

// ── Gemini API types ──────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentBody {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

// ── Client impl ─────────────────────────────────────

pub struct GeminiCaptionClient {
    config: CaptionConfig,
    client: reqwest::Client,
}

impl GeminiCaptionClient {
    pub fn new(config: CaptionConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn caption_prompt(&self, title: &str, project: &str) -> String {
        format!(
            "Generate a short, engaging social media caption for a post titled \"{}\" under the project \"{}\" for the {}. Include 3 relevant hashtags.",
            title, project, self.config.organization
        )
    }

    fn schedule_prompt(posts: &[ContentItem]) -> String {
        let posts_json = serde_json::to_string(posts).unwrap_or_else(|_| "[]".to_string());
        format!(
            "Based on these existing posts: {}, suggest an optimal posting time for the next post to maximize engagement for university students. Return a brief reasoning.",
            posts_json
        )
    }

    /// Send one prompt and return the reply text (None when the reply is empty)
    async fn generate(&self, api_key: &str, prompt: String) -> Result<Option<String>, String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        );
        let body = GenerateContentBody {
            contents: vec![RequestContent {
                parts: vec![TextPart { text: Some(prompt) }],
            }],
        };

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status, body));
        }

        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| format!("Parse response: {}", e))?;

        Ok(parsed.text())
    }
}

#[async_trait]
impl CaptionGenerator for GeminiCaptionClient {
    async fn generate_caption(&self, title: &str, project: &str) -> String {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return MISSING_KEY_CAPTION.to_string();
        };

        match self.generate(api_key, self.caption_prompt(title, project)).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                log::warn!("[CAPTION] Empty reply for '{}'", title);
                EMPTY_CAPTION.to_string()
            }
            Err(e) => {
                log::error!("[CAPTION] Generation failed for '{}': {}", title, e);
                FAILED_CAPTION.to_string()
            }
        }
    }

    async fn suggest_schedule(&self, posts: &[ContentItem]) -> String {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return MISSING_KEY_SCHEDULE.to_string();
        };

        match self.generate(api_key, Self::schedule_prompt(posts)).await {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_CAPTION.to_string(),
            Err(e) => {
                log::error!("[CAPTION] Schedule suggestion failed: {}", e);
                FAILED_SCHEDULE.to_string()
            }
        }
    }
}

// ── Pending request tracking ─────────────────────────

/// Identifies one caption request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionTicket(u64);

/// Tracks the "generating" flag for the caption field and drops replies that
/// arrive after the request was superseded or cancelled.
#[derive(Debug, Default)]
pub struct CaptionSlot {
    current: Option<CaptionTicket>,
    issued: u64,
}

impl CaptionSlot {
    pub fn is_generating(&self) -> bool {
        self.current.is_some()
    }

    /// Start a request, superseding any in flight
    pub fn begin(&mut self) -> CaptionTicket {
        self.issued += 1;
        let ticket = CaptionTicket(self.issued);
        self.current = Some(ticket);
        ticket
    }

    /// Accept a reply. Returns the text only if `ticket` is still current.
    pub fn finish(&mut self, ticket: CaptionTicket, text: String) -> Option<String> {
        if self.current != Some(ticket) {
            log::debug!("[CAPTION] Discarding stale reply {:?}", ticket);
            return None;
        }
        self.current = None;
        Some(text)
    }

    /// Abandon the current request (its reply will be discarded)
    pub fn cancel(&mut self) {
        self.current = None;
    }
}

/// Everything needed to run one caption request off the planner
#[derive(Debug, Clone)]
pub struct CaptionRequest {
    pub ticket: CaptionTicket,
    pub title: String,
    pub project: String,
}

impl CaptionRequest {
    /// Title is required; an empty project falls back to the default label.
    pub fn new(ticket: CaptionTicket, title: &str, project: &str) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        let project = match project.trim() {
            "" => defaults::CAPTION_PROJECT_LABEL,
            p => p,
        };
        Ok(Self {
            ticket,
            title: title.to_string(),
            project: project.to_string(),
        })
    }

    pub async fn run(&self, generator: &dyn CaptionGenerator) -> String {
        generator.generate_caption(&self.title, &self.project).await
    }
}
