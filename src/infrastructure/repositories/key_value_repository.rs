use crate::error::AppResult;
use async_trait::async_trait;

pub const USAGE_KEY: &str = "incdrops_usage";
pub const SAVED_IDEAS_KEY: &str = "incdrops_saved";
pub const HISTORY_KEY: &str = "incdrops_history";
pub const TIER_KEY: &str = "incdrops_tier";

/// Persistent string key-value store backing the session state.
///
/// Each key is read and written independently; there is no transaction
/// spanning several keys. Callers own the encoding of values.
#[async_trait]
pub trait KeyValueRepository: Send + Sync {
    /// Read the raw value stored under `key`
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}
