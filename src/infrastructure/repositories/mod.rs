pub mod gemini_idea_oracle_repository;
pub mod idea_oracle_repository;
pub mod key_value_repository;
pub mod memory_key_value_repository;
pub mod postgres_key_value_repository;

pub use gemini_idea_oracle_repository::{GeminiIdeaOracleRepository, GenerationConfig};
pub use idea_oracle_repository::IdeaOracleRepository;
pub use key_value_repository::{
    KeyValueRepository, HISTORY_KEY, SAVED_IDEAS_KEY, TIER_KEY, USAGE_KEY,
};
pub use memory_key_value_repository::InMemoryKeyValueRepository;
pub use postgres_key_value_repository::PostgresKeyValueRepository;
