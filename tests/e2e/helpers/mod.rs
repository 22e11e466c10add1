use anyhow::Result;
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use incdrops_backend::{
    controllers::{
        history::HistoryController, ideas::IdeasController, saved::SavedController,
        usage::UsageController,
    },
    domain::{
        ideas::{GenerationSettings, IdeaService, IdeaStore, ResponseFormat},
        quota::QuotaTracker,
        shared::FixedClock,
    },
    infrastructure::{
        http::build_router,
        repositories::{InMemoryKeyValueRepository, KeyValueRepository},
    },
};
use serde_json::{json, Value};
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod api_client;
pub mod postgres;

use api_client::TestClient;
use oracle::ScriptedOracle;

pub const BATCH_SIZE: usize = 10;

/// Mid-month instant every test starts at
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 10, 10, 0, 0).unwrap()
}

pub fn coaching_form() -> Value {
    json!({
        "industry": "Coaching",
        "targetAudience": "New parents",
        "services": "",
        "contentType": "social"
    })
}

pub struct TestContext {
    pub client: TestClient,
    pub store: Arc<InMemoryKeyValueRepository>,
    pub oracle: Arc<ScriptedOracle>,
    pub clock: Arc<FixedClock>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            TestContext::start(
                Arc::new(InMemoryKeyValueRepository::new()),
                Arc::new(ScriptedOracle::new()),
                Arc::new(FixedClock::new(test_now())),
            )
            .await
            .expect("Failed to start test server")
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Server task ends with the runtime
        }
    }
}

impl TestContext {
    /// Start a server over the given store, as a process restart would
    pub async fn start(
        store: Arc<InMemoryKeyValueRepository>,
        oracle: Arc<ScriptedOracle>,
        clock: Arc<FixedClock>,
    ) -> Result<Self> {
        let client = start_server(store.clone(), oracle.clone(), clock.clone()).await?;

        Ok(Self {
            client,
            store,
            oracle,
            clock,
        })
    }

    /// Same store and clock, fresh process state
    #[allow(dead_code)]
    pub async fn restart(&self) -> Result<Self> {
        Self::start(self.store.clone(), self.oracle.clone(), self.clock.clone()).await
    }

    #[allow(dead_code)]
    pub async fn generate(&self) -> Result<api_client::ApiResponse> {
        self.client.post("/api/ideas/generate", &coaching_form()).await
    }
}

/// Serve the full application over any store on an ephemeral port
pub async fn start_server(
    store: Arc<dyn KeyValueRepository>,
    oracle: Arc<ScriptedOracle>,
    clock: Arc<FixedClock>,
) -> Result<TestClient> {
    let app = create_app(store, oracle, clock).await;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok(TestClient::new(&base_url))
}

async fn create_app(
    store: Arc<dyn KeyValueRepository>,
    oracle: Arc<ScriptedOracle>,
    clock: Arc<FixedClock>,
) -> Router {
    let quota = Arc::new(QuotaTracker::load(store.clone(), clock.clone()).await);
    let idea_store = Arc::new(IdeaStore::load(store.clone()).await);

    let idea_service = Arc::new(IdeaService::new(
        oracle,
        quota,
        idea_store,
        clock,
        GenerationSettings {
            batch_size: BATCH_SIZE,
            response_format: ResponseFormat::Json,
        },
    ));

    build_router(
        store,
        Arc::new(IdeasController::new(idea_service.clone())),
        Arc::new(SavedController::new(idea_service.clone())),
        Arc::new(HistoryController::new(idea_service.clone())),
        Arc::new(UsageController::new(idea_service)),
    )
}
