//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chatflow_core::error::CoreError;
use chatflow_core::types::DbId;
use chatflow_core::validation::validate_request;
use chatflow_db::models::project::{CreateProject, UpdateProject};
use chatflow_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_project;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    validate_request(&input)?;
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = %project.id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{project_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ensure_project(&state.pool, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{project_id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    validate_request(&input)?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    tracing::info!(project_id = %id, "Project renamed");
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{project_id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(project_id = %id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}
