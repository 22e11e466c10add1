use super::error::IdeaServiceError;
use super::export::{clipboard_text, ExportFormat};
use super::model::{FormInput, HistoryEntry, Idea};
use super::parser::parse_ideas_at;
use super::prompt::{build_prompt, ResponseFormat};
use super::store::IdeaStore;
use super::ExportSource;
use crate::domain::quota::{QuotaTracker, Tier, UsageSnapshot};
use crate::domain::shared::Clock;
use crate::infrastructure::repositories::IdeaOracleRepository;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

const GENERATION_FAILED: &str = "Failed to generate ideas. Try again.";

#[derive(Debug, Clone, Copy)]
pub struct GenerationSettings {
    pub batch_size: usize,
    pub response_format: ResponseFormat,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            batch_size: 10,
            response_format: ResponseFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub ideas: Vec<Idea>,
    pub usage: UsageSnapshot,
}

pub struct IdeaService {
    oracle: Arc<dyn IdeaOracleRepository>,
    quota: Arc<QuotaTracker>,
    store: Arc<IdeaStore>,
    clock: Arc<dyn Clock>,
    settings: GenerationSettings,
    // Held for a whole generation so gate check and increment cannot interleave
    generation_lock: Mutex<()>,
}

impl IdeaService {
    pub fn new(
        oracle: Arc<dyn IdeaOracleRepository>,
        quota: Arc<QuotaTracker>,
        store: Arc<IdeaStore>,
        clock: Arc<dyn Clock>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            oracle,
            quota,
            store,
            clock,
            settings,
            generation_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
pub trait IdeaServiceApi: Send + Sync {
    /// Generate a batch of ideas for the given form
    ///
    /// This operation:
    /// - Validates the required form fields
    /// - Checks the monthly quota for the current tier
    /// - Calls the oracle and parses its answer
    /// - Records history, replaces the displayed batch and counts the generation
    ///
    /// Nothing is recorded when the oracle call fails.
    async fn generate(&self, form: FormInput) -> Result<GenerationResult, IdeaServiceError>;

    async fn current_ideas(&self) -> Vec<Idea>;

    async fn saved_ideas(&self) -> Vec<Idea>;

    /// Returns false when an idea with the same id was already saved
    async fn save_idea(&self, idea: Idea) -> bool;

    async fn remove_saved_idea(&self, id: &str) -> bool;

    async fn history(&self) -> Vec<HistoryEntry>;

    async fn load_from_history(&self, entry_id: Uuid) -> Result<Vec<Idea>, IdeaServiceError>;

    async fn export(&self, source: ExportSource, format: ExportFormat) -> String;

    async fn copy_text(&self, id: &str, with_details: bool) -> Result<String, IdeaServiceError>;

    async fn usage(&self) -> UsageSnapshot;

    async fn set_tier(&self, tier: Tier);
}

#[async_trait]
impl IdeaServiceApi for IdeaService {
    async fn generate(&self, form: FormInput) -> Result<GenerationResult, IdeaServiceError> {
        tracing::info!(
            industry = %form.industry,
            target_audience = %form.target_audience,
            content_type = %form.content_type,
            has_services = form.services_text().is_some(),
            "Idea generation request"
        );

        // 1. Validate the form
        if !form.is_complete() {
            return Err(IdeaServiceError::Invalid(
                "Please fill in industry and target audience".to_string(),
            ));
        }

        // 2. One generation at a time
        let _generation = self.generation_lock.lock().await;

        // 3. Guard the monthly quota
        self.guard_quota().await?;

        // 4. Ask the oracle
        let prompt = build_prompt(&form, self.settings.batch_size, self.settings.response_format);
        let started = std::time::Instant::now();
        let text = self.oracle.complete(&prompt).await.map_err(|e| {
            tracing::error!(error = %e, "Oracle call failed");
            IdeaServiceError::Dependency(GENERATION_FAILED.to_string())
        })?;

        tracing::info!(
            latency_ms = started.elapsed().as_millis(),
            response_length = text.len(),
            "Oracle responded"
        );

        // 5. Parse, never fails
        let now = self.clock.now();
        let ideas = parse_ideas_at(&text, &form, self.settings.batch_size, now);

        // 6. Commit: history, display, usage
        self.store
            .record_history(HistoryEntry::new(now, form, ideas.clone()))
            .await;
        self.store.set_current(ideas.clone()).await;
        self.quota.record_generation().await;

        let usage = self.quota.snapshot().await;
        tracing::info!(
            ideas = ideas.len(),
            count = usage.count,
            tier = %usage.tier,
            "Ideas generated"
        );

        Ok(GenerationResult { ideas, usage })
    }

    async fn current_ideas(&self) -> Vec<Idea> {
        self.store.current().await
    }

    async fn saved_ideas(&self) -> Vec<Idea> {
        self.store.saved().await
    }

    async fn save_idea(&self, idea: Idea) -> bool {
        self.store.save(idea).await
    }

    async fn remove_saved_idea(&self, id: &str) -> bool {
        self.store.remove(id).await
    }

    async fn history(&self) -> Vec<HistoryEntry> {
        self.store.history().await
    }

    async fn load_from_history(&self, entry_id: Uuid) -> Result<Vec<Idea>, IdeaServiceError> {
        self.store
            .load_from_history(entry_id)
            .await
            .ok_or_else(|| IdeaServiceError::NotFound("History entry".to_string()))
    }

    async fn export(&self, source: ExportSource, format: ExportFormat) -> String {
        let ideas = match source {
            ExportSource::Current => self.store.current().await,
            ExportSource::Saved => self.store.saved().await,
        };

        tracing::info!(
            source = ?source,
            format = ?format,
            ideas = ideas.len(),
            "Exporting ideas"
        );

        format.render(&ideas)
    }

    async fn copy_text(&self, id: &str, with_details: bool) -> Result<String, IdeaServiceError> {
        self.store
            .find(id)
            .await
            .map(|idea| clipboard_text(&idea, with_details))
            .ok_or_else(|| IdeaServiceError::NotFound("Idea".to_string()))
    }

    async fn usage(&self) -> UsageSnapshot {
        self.quota.snapshot().await
    }

    async fn set_tier(&self, tier: Tier) {
        self.quota.set_tier(tier).await
    }
}

impl IdeaService {
    async fn guard_quota(&self) -> Result<(), IdeaServiceError> {
        if self.quota.can_generate().await {
            return Ok(());
        }

        let tier = self.quota.tier().await;
        let limit = tier
            .monthly_limit()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "unlimited".to_string());

        tracing::warn!(tier = %tier, limit = %limit, "Monthly quota exhausted");

        Err(IdeaServiceError::PaymentRequired(format!(
            "You've reached your {} tier limit of {} idea generations this month. Upgrade to continue.",
            tier, limit
        )))
    }
}
