//! Handlers for `/projects/{project_id}/groups`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chatflow_core::error::CoreError;
use chatflow_core::types::DbId;
use chatflow_core::validation::validate_request;
use chatflow_db::models::group::{CreateGroup, UpdateGroup};
use chatflow_db::repositories::GroupRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_group, ensure_project};
use crate::response::DataResponse;
use crate::state::AppState;

fn group_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Group",
        id,
    })
}

/// POST /api/v1/projects/{project_id}/groups
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateGroup>,
) -> AppResult<impl IntoResponse> {
    validate_request(&input)?;
    ensure_project(&state.pool, project_id).await?;

    let group = GroupRepo::create(&state.pool, project_id, &input).await?;
    tracing::info!(%project_id, group_id = %group.id, "Group created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: group })))
}

/// GET /api/v1/projects/{project_id}/groups
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_project(&state.pool, project_id).await?;
    let groups = GroupRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: groups }))
}

/// GET /api/v1/projects/{project_id}/groups/{group_id}
///
/// Returns the group with its actions and buttons in sequence order and
/// its inputs in creation order.
pub async fn get_detail(
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_project(&state.pool, project_id).await?;
    let detail = GroupRepo::find_detail(&state.pool, project_id, group_id)
        .await?
        .ok_or_else(|| group_not_found(group_id))?;

    tracing::debug!(
        %group_id,
        actions = detail.actions.len(),
        buttons = detail.buttons.len(),
        inputs = detail.inputs.len(),
        "Loaded group detail"
    );

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/projects/{project_id}/groups/{group_id}
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateGroup>,
) -> AppResult<impl IntoResponse> {
    validate_request(&input)?;
    ensure_group(&state.pool, project_id, group_id).await?;
    let group = GroupRepo::update(&state.pool, project_id, group_id, &input)
        .await?
        .ok_or_else(|| group_not_found(group_id))?;
    tracing::info!(%group_id, "Group renamed");
    Ok(Json(DataResponse { data: group }))
}

/// DELETE /api/v1/projects/{project_id}/groups/{group_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_group(&state.pool, project_id, group_id).await?;
    if GroupRepo::delete(&state.pool, project_id, group_id).await? {
        tracing::info!(%project_id, %group_id, "Group deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(group_not_found(group_id))
    }
}
