use super::key_value_repository::KeyValueRepository;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Process-local store, used when no database is configured and in tests
#[derive(Default)]
pub struct InMemoryKeyValueRepository {
    entries: RwLock<HashMap<String, String>>,
    unavailable: AtomicBool,
}

impl InMemoryKeyValueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail, simulating an outage
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Storage("in-memory store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueRepository for InMemoryKeyValueRepository {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.check_available()?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.check_available()?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.check_available()
    }
}
