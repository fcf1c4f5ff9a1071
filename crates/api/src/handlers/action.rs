//! Handlers for `/projects/{project_id}/groups/{group_id}/actions`.
//!
//! Create and update bodies are read as raw JSON and dispatched on their
//! `type` field, so an unregistered type is reported as such rather than as
//! a generic deserialization failure.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chatflow_core::actions::ActionPayload;
use chatflow_core::error::CoreError;
use chatflow_core::sequencing::SequenceAssignment;
use chatflow_core::types::DbId;
use chatflow_db::repositories::ActionRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_group;
use crate::response::DataResponse;
use crate::state::AppState;

fn action_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Action",
        id,
    })
}

/// POST .../groups/{group_id}/actions
///
/// Appends the action after the group's existing actions.
pub async fn create(
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(DbId, DbId)>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let payload = ActionPayload::from_json(body)?;
    ensure_group(&state.pool, project_id, group_id).await?;

    let action = ActionRepo::create(&state.pool, group_id, &payload).await?;
    tracing::info!(
        %group_id,
        action_id = %action.id,
        action_type = %action.action_type(),
        sequence_number = action.sequence_number,
        "Action created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: action })))
}

/// GET .../groups/{group_id}/actions
pub async fn list(
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_group(&state.pool, project_id, group_id).await?;
    let actions = ActionRepo::list_by_group(&state.pool, group_id).await?;
    Ok(Json(DataResponse { data: actions }))
}

/// GET .../groups/{group_id}/actions/{action_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((project_id, group_id, action_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_group(&state.pool, project_id, group_id).await?;
    let action = ActionRepo::find_by_id(&state.pool, group_id, action_id)
        .await?
        .ok_or_else(|| action_not_found(action_id))?;
    Ok(Json(DataResponse { data: action }))
}

/// PUT .../groups/{group_id}/actions/{action_id}
///
/// Replaces the variant fields. The body's `type` must match the stored
/// action's type.
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, group_id, action_id)): Path<(DbId, DbId, DbId)>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let payload = ActionPayload::from_json(body)?;
    ensure_group(&state.pool, project_id, group_id).await?;

    let action = ActionRepo::update(&state.pool, group_id, action_id, &payload)
        .await?
        .ok_or_else(|| action_not_found(action_id))?;
    tracing::info!(%group_id, %action_id, "Action updated");
    Ok(Json(DataResponse { data: action }))
}

/// DELETE .../groups/{group_id}/actions/{action_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, group_id, action_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_group(&state.pool, project_id, group_id).await?;
    if ActionRepo::delete(&state.pool, group_id, action_id).await? {
        tracing::info!(%group_id, %action_id, "Action deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(action_not_found(action_id))
    }
}

/// POST .../groups/{group_id}/actions/sequence
///
/// Body is the complete list of `{ id, sequence_number }` pairs for the group.
pub async fn change_sequence(
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(DbId, DbId)>,
    Json(proposed): Json<Vec<SequenceAssignment>>,
) -> AppResult<impl IntoResponse> {
    ensure_group(&state.pool, project_id, group_id).await?;
    let assignments = ActionRepo::change_sequence(&state.pool, group_id, &proposed).await?;
    tracing::info!(%group_id, count = assignments.len(), "Actions reordered");
    Ok(Json(DataResponse { data: assignments }))
}
