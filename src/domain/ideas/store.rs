use super::model::{HistoryEntry, Idea};
use crate::infrastructure::repositories::{KeyValueRepository, HISTORY_KEY, SAVED_IDEAS_KEY};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Most recent generation sessions kept in history
pub const HISTORY_LIMIT: usize = 50;

#[derive(Default)]
struct StoreState {
    saved: Vec<Idea>,
    history: Vec<HistoryEntry>,
    current: Vec<Idea>,
}

/// Saved ideas, generation history and the currently displayed batch.
///
/// Every mutation updates memory first and then writes the whole affected
/// collection while still holding the lock, so memory and store never
/// diverge by more than the last call.
pub struct IdeaStore {
    store: Arc<dyn KeyValueRepository>,
    state: Mutex<StoreState>,
}

impl IdeaStore {
    pub async fn load(store: Arc<dyn KeyValueRepository>) -> Self {
        let saved: Vec<Idea> = load_collection(store.as_ref(), SAVED_IDEAS_KEY).await;
        let mut history: Vec<HistoryEntry> = load_collection(store.as_ref(), HISTORY_KEY).await;
        history.truncate(HISTORY_LIMIT);

        tracing::info!(
            saved = saved.len(),
            history = history.len(),
            "Idea store loaded"
        );

        Self {
            store,
            state: Mutex::new(StoreState {
                saved,
                history,
                current: Vec::new(),
            }),
        }
    }

    /// Add an idea unless one with the same id is already saved
    pub async fn save(&self, idea: Idea) -> bool {
        let mut state = self.state.lock().await;
        if state.saved.iter().any(|saved| saved.id == idea.id) {
            tracing::debug!(idea_id = %idea.id, "Idea already saved");
            return false;
        }

        tracing::info!(idea_id = %idea.id, "Saving idea");
        state.saved.push(idea);
        self.persist(SAVED_IDEAS_KEY, &state.saved).await;
        true
    }

    /// Remove a saved idea; unknown ids are ignored
    pub async fn remove(&self, id: &str) -> bool {
        let mut state = self.state.lock().await;
        let before = state.saved.len();
        state.saved.retain(|idea| idea.id != id);

        if state.saved.len() == before {
            return false;
        }

        tracing::info!(idea_id = %id, "Removed saved idea");
        self.persist(SAVED_IDEAS_KEY, &state.saved).await;
        true
    }

    /// Prepend an entry, evicting the oldest beyond [`HISTORY_LIMIT`]
    pub async fn record_history(&self, entry: HistoryEntry) {
        let mut state = self.state.lock().await;
        state.history.insert(0, entry);
        if state.history.len() > HISTORY_LIMIT {
            let evicted = state.history.len() - HISTORY_LIMIT;
            state.history.truncate(HISTORY_LIMIT);
            tracing::debug!(evicted = evicted, "Evicted oldest history entries");
        }
        self.persist(HISTORY_KEY, &state.history).await;
    }

    /// Display a past entry's ideas verbatim. History itself is untouched.
    pub async fn load_from_history(&self, entry_id: Uuid) -> Option<Vec<Idea>> {
        let mut state = self.state.lock().await;
        let ideas = state
            .history
            .iter()
            .find(|entry| entry.id == entry_id)
            .map(|entry| entry.ideas.clone())?;

        state.current = ideas.clone();
        Some(ideas)
    }

    pub async fn set_current(&self, ideas: Vec<Idea>) {
        self.state.lock().await.current = ideas;
    }

    pub async fn current(&self) -> Vec<Idea> {
        self.state.lock().await.current.clone()
    }

    pub async fn saved(&self) -> Vec<Idea> {
        self.state.lock().await.saved.clone()
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.state.lock().await.history.clone()
    }

    /// Look an idea up in the displayed batch, then among saved ideas
    pub async fn find(&self, id: &str) -> Option<Idea> {
        let state = self.state.lock().await;
        state
            .current
            .iter()
            .chain(state.saved.iter())
            .find(|idea| idea.id == id)
            .cloned()
    }

    async fn persist<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, key = key, "Failed to encode collection");
                return;
            }
        };

        if let Err(e) = self.store.set(key, &raw).await {
            tracing::warn!(error = %e, key = key, "Failed to persist collection");
        }
    }
}

/// Read a JSON collection, treating anything unreadable as empty
async fn load_collection<T: DeserializeOwned>(store: &dyn KeyValueRepository, key: &str) -> Vec<T> {
    match store.get(key).await {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, key = key, "Malformed collection, starting empty");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, key = key, "Collection unavailable, starting empty");
            Vec::new()
        }
    }
}
