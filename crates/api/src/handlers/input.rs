//! Handlers for `/projects/{project_id}/groups/{group_id}/inputs`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chatflow_core::error::CoreError;
use chatflow_core::types::DbId;
use chatflow_db::models::button::SetDestination;
use chatflow_db::models::input::CreateInput;
use chatflow_db::repositories::InputRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_destination, ensure_group};
use crate::response::DataResponse;
use crate::state::AppState;

fn input_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Input",
        id,
    })
}

/// POST .../groups/{group_id}/inputs
///
/// 409 if the group already has an input of the same type.
pub async fn create(
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(DbId, DbId)>,
    Json(input): Json<CreateInput>,
) -> AppResult<impl IntoResponse> {
    ensure_group(&state.pool, project_id, group_id).await?;
    let created = InputRepo::create(&state.pool, group_id, &input).await?;
    tracing::info!(
        %group_id,
        input_id = %created.id,
        input_type = %created.input_type,
        "Input created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET .../groups/{group_id}/inputs
pub async fn list(
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_group(&state.pool, project_id, group_id).await?;
    let inputs = InputRepo::list_by_group(&state.pool, group_id).await?;
    Ok(Json(DataResponse { data: inputs }))
}

/// GET .../groups/{group_id}/inputs/{input_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((project_id, group_id, input_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ensure_group(&state.pool, project_id, group_id).await?;
    let input = InputRepo::find_by_id(&state.pool, group_id, input_id)
        .await?
        .ok_or_else(|| input_not_found(input_id))?;
    Ok(Json(DataResponse { data: input }))
}

/// PATCH .../groups/{group_id}/inputs/{input_id}/destination
pub async fn set_destination(
    State(state): State<AppState>,
    Path((project_id, group_id, input_id)): Path<(DbId, DbId, DbId)>,
    Json(body): Json<SetDestination>,
) -> AppResult<impl IntoResponse> {
    ensure_group(&state.pool, project_id, group_id).await?;
    ensure_destination(&state.pool, project_id, body.destination_group_id).await?;

    let input =
        InputRepo::set_destination(&state.pool, group_id, input_id, body.destination_group_id)
            .await?
            .ok_or_else(|| input_not_found(input_id))?;
    tracing::info!(
        %input_id,
        destination_group_id = ?body.destination_group_id,
        "Input destination set"
    );
    Ok(Json(DataResponse { data: input }))
}

/// DELETE .../groups/{group_id}/inputs/{input_id}
pub async fn delete(
    State(state): State<AppState>,
    Path((project_id, group_id, input_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_group(&state.pool, project_id, group_id).await?;
    if InputRepo::delete(&state.pool, group_id, input_id).await? {
        tracing::info!(%group_id, %input_id, "Input deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(input_not_found(input_id))
    }
}
