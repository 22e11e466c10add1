use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of content the ideas are for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Social,
    Blog,
    Ads,
    Email,
}

impl ContentType {
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Social => "Social Posts",
            ContentType::Blog => "Blog Ideas",
            ContentType::Ads => "Ad Copy",
            ContentType::Email => "Email Campaigns",
        }
    }

    /// Platforms suggested when the oracle gave us nothing to go on
    pub fn default_platforms(&self) -> Vec<String> {
        let platforms: &[&str] = match self {
            ContentType::Social => &["Instagram", "LinkedIn"],
            ContentType::Blog => &["Blog", "LinkedIn"],
            ContentType::Ads => &["Facebook", "Google Ads"],
            ContentType::Email => &["Email"],
        };
        platforms.iter().map(|p| p.to_string()).collect()
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Social => write!(f, "social"),
            ContentType::Blog => write!(f, "blog"),
            ContentType::Ads => write!(f, "ads"),
            ContentType::Email => write!(f, "email"),
        }
    }
}

/// Business details collected from the generator form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FormInput {
    pub industry: String,
    #[serde(alias = "targetAudience")]
    pub target_audience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<String>,
    #[serde(default, alias = "contentType")]
    pub content_type: ContentType,
}

impl FormInput {
    /// Services text, or None when absent or blank
    pub fn services_text(&self) -> Option<&str> {
        self.services
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn is_complete(&self) -> bool {
        !self.industry.trim().is_empty() && !self.target_audience.trim().is_empty()
    }
}

/// One content idea card. Identity is `id` alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub content_type: ContentType,
    pub timestamp: DateTime<Utc>,
}

/// A past generation session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub form: FormInput,
    pub ideas: Vec<Idea>,
}

impl HistoryEntry {
    pub fn new(timestamp: DateTime<Utc>, form: FormInput, ideas: Vec<Idea>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            form,
            ideas,
        }
    }
}
