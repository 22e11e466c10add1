use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::ideas::{HistoryEntry, Idea, IdeaService, IdeaServiceApi},
    error::AppResult,
};

pub struct HistoryController {
    idea_service: Arc<IdeaService>,
}

impl HistoryController {
    pub fn new(idea_service: Arc<IdeaService>) -> Self {
        Self { idea_service }
    }

    /// GET /api/history - Past generations, newest first
    pub async fn list_history(
        State(controller): State<Arc<HistoryController>>,
    ) -> AppResult<Json<Vec<HistoryEntry>>> {
        Ok(Json(controller.idea_service.history().await))
    }

    /// POST /api/history/:id/load - Put a past batch back on display
    pub async fn load_entry(
        State(controller): State<Arc<HistoryController>>,
        Path(entry_id): Path<Uuid>,
    ) -> AppResult<Json<Vec<Idea>>> {
        let ideas = controller.idea_service.load_from_history(entry_id).await?;
        Ok(Json(ideas))
    }
}
