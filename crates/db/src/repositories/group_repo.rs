//! Repository for the `groups` table.

use chatflow_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::error::RepoError;
use crate::models::group::{CreateGroup, Group, GroupDetail, UpdateGroup};
use crate::repositories::{ActionRepo, ButtonRepo, InputRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, created_at";

/// Provides CRUD operations for groups.
pub struct GroupRepo;

impl GroupRepo {
    /// Insert a new group into a project, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateGroup,
    ) -> Result<Group, sqlx::Error> {
        let query = format!(
            "INSERT INTO groups (project_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(project_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a group by ID, scoped to its project.
    pub async fn find_in_project(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM groups WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(executor)
            .await
    }

    /// Load a group with its actions, buttons and inputs from one snapshot.
    ///
    /// The reads share a `REPEATABLE READ` read-only transaction, so a
    /// reorder committing midway is either fully visible or not at all.
    pub async fn find_detail(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<GroupDetail>, RepoError> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let Some(group) = Self::find_in_project(&mut *tx, project_id, id).await? else {
            return Ok(None);
        };
        let actions = ActionRepo::list_by_group(&mut *tx, id).await?;
        let buttons = ButtonRepo::list_by_group(&mut *tx, id).await?;
        let inputs = InputRepo::list_by_group(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(Some(GroupDetail {
            group,
            actions,
            buttons,
            inputs,
        }))
    }

    /// List a project's groups, oldest first.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Group>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM groups WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Rename a group. Returns `None` if no such group exists in the project.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateGroup,
    ) -> Result<Option<Group>, sqlx::Error> {
        let query = format!(
            "UPDATE groups SET name = $3
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a group. Owned actions, buttons and inputs cascade; buttons and
    /// inputs elsewhere that point at it have their destination cleared.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
