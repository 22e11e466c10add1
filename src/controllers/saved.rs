use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    domain::ideas::{Idea, IdeaService, IdeaServiceApi},
    error::AppResult,
};

pub struct SavedController {
    idea_service: Arc<IdeaService>,
}

impl SavedController {
    pub fn new(idea_service: Arc<IdeaService>) -> Self {
        Self { idea_service }
    }

    /// GET /api/saved - List saved ideas
    pub async fn list_saved(
        State(controller): State<Arc<SavedController>>,
    ) -> AppResult<Json<Vec<Idea>>> {
        Ok(Json(controller.idea_service.saved_ideas().await))
    }

    /// POST /api/saved - Save an idea, idempotent by id
    pub async fn save_idea(
        State(controller): State<Arc<SavedController>>,
        Json(idea): Json<Idea>,
    ) -> AppResult<StatusCode> {
        let inserted = controller.idea_service.save_idea(idea).await;
        Ok(if inserted {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        })
    }

    /// DELETE /api/saved/:id - Remove a saved idea
    pub async fn remove_idea(
        State(controller): State<Arc<SavedController>>,
        Path(id): Path<String>,
    ) -> AppResult<StatusCode> {
        controller.idea_service.remove_saved_idea(&id).await;
        Ok(StatusCode::NO_CONTENT)
    }
}
