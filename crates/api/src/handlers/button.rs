//! Handlers for `/projects/{project_id}/groups/{group_id}/buttons`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chatflow_core::error::CoreError;
use chatflow_core::sequencing::SequenceAssignment;
use chatflow_core::types::DbId;
use chatflow_core::validation::validate_request;
use chatflow_db::models::button::{CreateButton, SetDestination, UpdateButton};
use chatflow_db::repositories::ButtonRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_destination, ensure_group};
use crate::response::DataResponse;
use crate::state::AppState;

fn button_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Button",
        id,
    })
}

/// POST .../groups/{group_id}/buttons
pub async fn create(
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(DbId, DbId)>,
    Json(input): Json<CreateButton>,
) -> AppResult<impl IntoResponse> {
    validate_request(&input)?;
    ensure_group(&state.pool, project_id, group_id).await?;

    let button = ButtonRepo::create(&state.pool, group_id, &input).await?;
    tracing::info!(
        %group_id,
        button_id = %button.id,
        sequence_number = button.sequence_number,
        "Button created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: button })))
}

/// GET .../groups/{group_id}/buttons
pub async fn list(
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_group(&state.pool, project_id, group_id).await?;
    let buttons = ButtonRepo::list_by_group(&state.pool, group_id).await?;
    Ok(Json(DataResponse { data: buttons }))
}

/// GET .../groups/{group_id}/buttons/{button_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((project_id, group_id, button_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_group(&state.pool, project_id, group_id).await?;
    let button = ButtonRepo::find_by_id(&state.pool, group_id, button_id)
        .await?
        .ok_or_else(|| button_not_found(button_id))?;
    Ok(Json(DataResponse { data: button }))
}

/// PUT .../groups/{group_id}/buttons/{button_id}
pub async fn update(
    State(state): State<AppState>,
    Path((project_id, group_id, button_id)): Path<(DbId, DbId, DbId)>,
    Json(input): Json<UpdateButton>,
) -> AppResult<impl IntoResponse> {
    validate_request(&input)?;
    ensure_group(&state.pool, project_id, group_id).await?;
    let button = ButtonRepo::update(&state.pool, group_id, button_id, &input)
        .await?
        .ok_or_else(|| button_not_found(button_id))?;
    tracing::info!(%group_id, %button_id, "Button updated");
    Ok(Json(DataResponse { data: button }))
}

/// PATCH .../groups/{group_id}/buttons/{button_id}/destination
///
/// `null` clears the destination.
pub async fn set_destination(
    State(state): State<AppState>,
    Path((project_id, group_id, button_id)): Path<(DbId, DbId, DbId)>,
    Json(input): Json<SetDestination>,
) -> AppResult<impl IntoResponse> {
    ensure_group(&state.pool, project_id, group_id).await?;
    ensure_destination(&state.pool, project_id, input.destination_group_id).await?;

    let button =
        ButtonRepo::set_destination(&state.pool, group_id, button_id, input.destination_group_id)
            .await?
            .ok_or_else(|| button_not_found(button_id))?;
    tracing::info!(
        %button_id,
        destination_group_id = ?input.destination_group_id,
        "Button destination set"
    );
    Ok(Json(DataResponse { data: button }))
}

/// DELETE .../groups/{group_id}/buttons/{button_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, group_id, button_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_group(&state.pool, project_id, group_id).await?;
    if ButtonRepo::delete(&state.pool, group_id, button_id).await? {
        tracing::info!(%group_id, %button_id, "Button deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(button_not_found(button_id))
    }
}

/// POST .../groups/{group_id}/buttons/sequence
pub async fn change_sequence(
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(DbId, DbId)>,
    Json(proposed): Json<Vec<SequenceAssignment>>,
) -> AppResult<impl IntoResponse> {
    ensure_group(&state.pool, project_id, group_id).await?;
    let assignments = ButtonRepo::change_sequence(&state.pool, group_id, &proposed).await?;
    tracing::info!(%group_id, count = assignments.len(), "Buttons reordered");
    Ok(Json(DataResponse { data: assignments }))
}
