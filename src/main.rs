use incdrops_backend::controllers::{
    history::HistoryController, ideas::IdeasController, saved::SavedController,
    usage::UsageController,
};
use incdrops_backend::domain::ideas::{GenerationSettings, IdeaService, IdeaStore};
use incdrops_backend::domain::quota::QuotaTracker;
use incdrops_backend::domain::shared::{Clock, SystemClock};
use incdrops_backend::infrastructure::config::{Config, LogFormat};
use incdrops_backend::infrastructure::db::{check_connection, create_pool};
use incdrops_backend::infrastructure::http::{build_router, start_http_server};
use incdrops_backend::infrastructure::repositories::{
    GeminiIdeaOracleRepository, GenerationConfig, IdeaOracleRepository,
    InMemoryKeyValueRepository, KeyValueRepository, PostgresKeyValueRepository,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        development = config.is_development(),
        "Starting IncDrops Backend on {}:{}",
        config.host,
        config.port
    );

    // Key-value store: Postgres when configured, otherwise process memory
    let store: Arc<dyn KeyValueRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            tracing::info!("Database connection pool created");

            check_connection(&pool).await?;
            tracing::info!("Database connection verified");

            let repo = PostgresKeyValueRepository::new(Arc::new(pool));
            repo.ensure_schema().await?;
            Arc::new(repo)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, session state will not survive a restart");
            Arc::new(InMemoryKeyValueRepository::new())
        }
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let oracle: Arc<dyn IdeaOracleRepository> = Arc::new(GeminiIdeaOracleRepository::new(
        config.gemini_api_base.clone(),
        config.gemini_model.clone(),
        config.gemini_api_key.clone(),
        GenerationConfig {
            max_output_tokens: config.gemini_max_output_tokens,
            temperature: config.gemini_temperature,
            top_p: config.gemini_top_p,
        },
        Duration::from_secs(config.gemini_timeout_secs),
    )?);
    tracing::info!(
        model = %config.gemini_model,
        timeout_secs = config.gemini_timeout_secs,
        "Gemini client initialized"
    );

    // Restore persisted session state
    let quota = Arc::new(QuotaTracker::load(store.clone(), clock.clone()).await);
    let idea_store = Arc::new(IdeaStore::load(store.clone()).await);

    let idea_service = Arc::new(IdeaService::new(
        oracle,
        quota,
        idea_store,
        clock,
        GenerationSettings {
            batch_size: config.idea_batch_size,
            response_format: config.response_format,
        },
    ));

    let app = build_router(
        store,
        Arc::new(IdeasController::new(idea_service.clone())),
        Arc::new(SavedController::new(idea_service.clone())),
        Arc::new(HistoryController::new(idea_service.clone())),
        Arc::new(UsageController::new(idea_service)),
    );

    start_http_server(&config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "incdrops_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
