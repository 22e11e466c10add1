use super::model::{month_key, next_month_start, Tier, UsageRecord, UsageSnapshot};
use crate::domain::shared::Clock;
use crate::infrastructure::repositories::{KeyValueRepository, TIER_KEY, USAGE_KEY};
use std::sync::Arc;
use tokio::sync::Mutex;

struct QuotaState {
    tier: Tier,
    usage: UsageRecord,
}

/// Monthly, tier-gated generation counter.
///
/// The counter is rolled over lazily: every read, gate check and increment
/// first compares the stored month with the clock and resets the count when
/// they differ. Unreadable persisted state never blocks usage; it is replaced
/// by a fresh record for the current month.
pub struct QuotaTracker {
    store: Arc<dyn KeyValueRepository>,
    clock: Arc<dyn Clock>,
    state: Mutex<QuotaState>,
}

impl QuotaTracker {
    /// Build the tracker from whatever the store currently holds
    pub async fn load(store: Arc<dyn KeyValueRepository>, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();

        let usage = match store.get(USAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<UsageRecord>(&raw) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(error = %e, "Malformed usage record, starting fresh");
                    UsageRecord::fresh(now)
                }
            },
            Ok(None) => UsageRecord::fresh(now),
            Err(e) => {
                tracing::warn!(error = %e, "Usage record unavailable, starting fresh");
                UsageRecord::fresh(now)
            }
        };

        let tier = match store.get(TIER_KEY).await {
            Ok(Some(raw)) => raw.parse::<Tier>().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Malformed tier, falling back to free");
                Tier::Free
            }),
            Ok(None) => Tier::Free,
            Err(e) => {
                tracing::warn!(error = %e, "Tier unavailable, falling back to free");
                Tier::Free
            }
        };

        tracing::info!(
            tier = %tier,
            month = %usage.month_key,
            count = usage.count,
            "Quota tracker loaded"
        );

        Self {
            store,
            clock,
            state: Mutex::new(QuotaState { tier, usage }),
        }
    }

    /// True while the current month's count is below the tier allowance
    pub async fn can_generate(&self) -> bool {
        let mut state = self.state.lock().await;
        self.roll_over(&mut state).await;

        match state.tier.monthly_limit() {
            Some(limit) => state.usage.count < limit,
            None => true,
        }
    }

    /// Count one successful generation and persist it
    pub async fn record_generation(&self) -> UsageRecord {
        let mut state = self.state.lock().await;
        self.roll_over(&mut state).await;

        state.usage.count = state.usage.count.saturating_add(1);
        self.persist_usage(&state.usage).await;

        tracing::info!(
            month = %state.usage.month_key,
            count = state.usage.count,
            tier = %state.tier,
            "Generation recorded"
        );

        state.usage.clone()
    }

    pub async fn tier(&self) -> Tier {
        self.state.lock().await.tier
    }

    /// Switch tier; takes effect on the next gate check
    pub async fn set_tier(&self, tier: Tier) {
        let mut state = self.state.lock().await;
        state.tier = tier;

        if let Err(e) = self.store.set(TIER_KEY, tier.as_str()).await {
            tracing::warn!(error = %e, tier = %tier, "Failed to persist tier");
        }

        tracing::info!(tier = %tier, "Subscription tier changed");
    }

    pub async fn snapshot(&self) -> UsageSnapshot {
        let mut state = self.state.lock().await;
        self.roll_over(&mut state).await;

        let limit = state.tier.monthly_limit();
        UsageSnapshot {
            tier: state.tier,
            month_key: state.usage.month_key.clone(),
            count: state.usage.count,
            limit,
            remaining: limit.map(|l| l.saturating_sub(state.usage.count)),
            resets_at: next_month_start(self.clock.now()),
        }
    }

    async fn roll_over(&self, state: &mut QuotaState) {
        let current = month_key(self.clock.now());
        if state.usage.month_key == current {
            return;
        }

        tracing::info!(
            previous_month = %state.usage.month_key,
            previous_count = state.usage.count,
            month = %current,
            "Month rolled over, resetting usage"
        );

        state.usage = UsageRecord {
            month_key: current,
            count: 0,
        };
        self.persist_usage(&state.usage).await;
    }

    async fn persist_usage(&self, usage: &UsageRecord) {
        let raw = match serde_json::to_string(usage) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode usage record");
                return;
            }
        };

        if let Err(e) = self.store.set(USAGE_KEY, &raw).await {
            tracing::warn!(error = %e, "Failed to persist usage record");
        }
    }
}
