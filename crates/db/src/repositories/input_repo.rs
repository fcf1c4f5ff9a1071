//! Repository for the `inputs` table.

use chatflow_core::inputs::duplicate_input_type;
use chatflow_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::error::{is_unique_violation, RepoError};
use crate::models::input::{CreateInput, Input};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, group_id, input_type, destination_group_id, created_at";

/// Provides CRUD operations for inputs.
pub struct InputRepo;

impl InputRepo {
    /// Insert a new input.
    ///
    /// Fails with a `Conflict` if the group already has an input of that type.
    pub async fn create(
        pool: &PgPool,
        group_id: DbId,
        input: &CreateInput,
    ) -> Result<Input, RepoError> {
        let query = format!(
            "INSERT INTO inputs (group_id, input_type)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Input>(&query)
            .bind(group_id)
            .bind(input.input_type.as_str())
            .fetch_one(pool)
            .await
            .map_err(|err| {
                if is_unique_violation(&err, "uq_inputs_group_type") {
                    duplicate_input_type(input.input_type).into()
                } else {
                    err.into()
                }
            })
    }

    /// Find an input of a group by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        group_id: DbId,
        id: DbId,
    ) -> Result<Option<Input>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inputs WHERE id = $1 AND group_id = $2");
        sqlx::query_as::<_, Input>(&query)
            .bind(id)
            .bind(group_id)
            .fetch_optional(pool)
            .await
    }

    /// List a group's inputs, oldest first.
    pub async fn list_by_group(
        executor: impl PgExecutor<'_>,
        group_id: DbId,
    ) -> Result<Vec<Input>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inputs WHERE group_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Input>(&query)
            .bind(group_id)
            .fetch_all(executor)
            .await
    }

    /// Point an input at another group, or clear its destination.
    pub async fn set_destination(
        pool: &PgPool,
        group_id: DbId,
        id: DbId,
        destination_group_id: Option<DbId>,
    ) -> Result<Option<Input>, sqlx::Error> {
        let query = format!(
            "UPDATE inputs SET destination_group_id = $3
             WHERE id = $1 AND group_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Input>(&query)
            .bind(id)
            .bind(group_id)
            .bind(destination_group_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an input. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, group_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inputs WHERE id = $1 AND group_id = $2")
            .bind(id)
            .bind(group_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
