pub mod action;
pub mod button;
pub mod group;
pub mod input;
pub mod project;

use chatflow_core::error::CoreError;
use chatflow_core::types::DbId;
use chatflow_db::models::group::Group;
use chatflow_db::models::project::Project;
use chatflow_db::repositories::{GroupRepo, ProjectRepo};
use chatflow_db::DbPool;

use crate::error::{AppError, AppResult};

/// Load a project or fail with `NotFound`.
pub async fn ensure_project(pool: &DbPool, project_id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
}

/// Resolve a group through its project.
///
/// Fails with `NotFound` for the project first, then for the group when it
/// is missing or belongs to another project. Every group-scoped handler
/// starts here.
pub async fn ensure_group(pool: &DbPool, project_id: DbId, group_id: DbId) -> AppResult<Group> {
    ensure_project(pool, project_id).await?;

    GroupRepo::find_in_project(pool, project_id, group_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id: group_id,
        }))
}

/// Check that a destination, when given, is a group of the same project.
pub async fn ensure_destination(
    pool: &DbPool,
    project_id: DbId,
    destination_group_id: Option<DbId>,
) -> AppResult<()> {
    let Some(destination) = destination_group_id else {
        return Ok(());
    };
    GroupRepo::find_in_project(pool, project_id, destination)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Group",
            id: destination,
        }))?;
    Ok(())
}
