pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod service;
pub mod store;

pub use error::IdeaServiceError;
pub use export::{clipboard_text, to_csv, to_text, ExportFormat};
pub use model::{ContentType, FormInput, HistoryEntry, Idea};
pub use parser::{parse_ideas, parse_ideas_at, FALLBACK_BATCH_SIZE};
pub use prompt::{build_prompt, ResponseFormat};
pub use service::{GenerationResult, GenerationSettings, IdeaService, IdeaServiceApi};
pub use store::{IdeaStore, HISTORY_LIMIT};

use crate::domain::shared::usage_dto::UsageResponse;
use serde::{Deserialize, Serialize};

/// Response for POST /api/ideas/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateIdeasResponse {
    pub ideas: Vec<Idea>,
    pub usage: UsageResponse,
}

impl From<GenerationResult> for GenerateIdeasResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            ideas: result.ideas,
            usage: result.usage.into(),
        }
    }
}

/// Which collection an export reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportSource {
    #[default]
    Current,
    Saved,
}

/// Query for GET /api/ideas/export
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub source: ExportSource,
}

/// Query for GET /api/ideas/:id/copy
#[derive(Debug, Deserialize)]
pub struct CopyQuery {
    #[serde(default)]
    pub details: bool,
}
