use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::ideas::{
        CopyQuery, ExportQuery, FormInput, GenerateIdeasResponse, Idea, IdeaService,
        IdeaServiceApi,
    },
    error::{AppError, AppResult},
};

pub struct IdeasController {
    idea_service: Arc<IdeaService>,
}

impl IdeasController {
    pub fn new(idea_service: Arc<IdeaService>) -> Self {
        Self { idea_service }
    }

    /// POST /api/ideas/generate - Generate a new batch of ideas
    pub async fn generate(
        State(controller): State<Arc<IdeasController>>,
        Json(form): Json<FormInput>,
    ) -> AppResult<Json<GenerateIdeasResponse>> {
        let result = controller.idea_service.generate(form).await?;
        Ok(Json(result.into()))
    }

    /// GET /api/ideas - Ideas currently on display
    pub async fn list_current(
        State(controller): State<Arc<IdeasController>>,
    ) -> AppResult<Json<Vec<Idea>>> {
        Ok(Json(controller.idea_service.current_ideas().await))
    }

    /// GET /api/ideas/export - Download current or saved ideas
    pub async fn export(
        State(controller): State<Arc<IdeasController>>,
        Query(query): Query<ExportQuery>,
    ) -> AppResult<(StatusCode, HeaderMap, String)> {
        let body = controller
            .idea_service
            .export(query.source, query.format)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(query.format.content_type()),
        );
        let disposition = format!("attachment; filename=\"{}\"", query.format.file_name());
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&disposition).map_err(|e| AppError::Internal(e.to_string()))?,
        );

        Ok((StatusCode::OK, headers, body))
    }

    /// GET /api/ideas/:id/copy - Clipboard text for one idea
    pub async fn copy(
        State(controller): State<Arc<IdeasController>>,
        Path(id): Path<String>,
        Query(query): Query<CopyQuery>,
    ) -> AppResult<(HeaderMap, String)> {
        let text = controller
            .idea_service
            .copy_text(&id, query.details)
            .await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );

        Ok((headers, text))
    }
}
