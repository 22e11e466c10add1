use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::{
        ideas::{IdeaService, IdeaServiceApi},
        quota::Tier,
        shared::usage_dto::UsageResponse,
    },
    error::AppResult,
};

/// Request for PUT /api/tier
#[derive(Debug, Serialize, Deserialize)]
pub struct SetTierRequest {
    pub tier: Tier,
}

pub struct UsageController {
    idea_service: Arc<IdeaService>,
}

impl UsageController {
    pub fn new(idea_service: Arc<IdeaService>) -> Self {
        Self { idea_service }
    }

    /// GET /api/usage - Monthly usage for the current tier
    pub async fn get_usage(
        State(controller): State<Arc<UsageController>>,
    ) -> AppResult<Json<UsageResponse>> {
        Ok(Json(controller.idea_service.usage().await.into()))
    }

    /// PUT /api/tier - Change subscription tier
    pub async fn set_tier(
        State(controller): State<Arc<UsageController>>,
        Json(request): Json<SetTierRequest>,
    ) -> AppResult<StatusCode> {
        controller.idea_service.set_tier(request.tier).await;
        Ok(StatusCode::NO_CONTENT)
    }
}
