//! Repository for the `buttons` table.

use chatflow_core::sequencing::SequenceAssignment;
use chatflow_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::error::RepoError;
use crate::models::button::{Button, CreateButton, UpdateButton};
use crate::repositories::sequence_repo::{SequenceRepo, BUTTONS};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, group_id, text, payload, sequence_number, destination_group_id, created_at";

/// Provides CRUD and ordering operations for buttons.
pub struct ButtonRepo;

impl ButtonRepo {
    /// Append a new button at the end of the group.
    pub async fn create(
        pool: &PgPool,
        group_id: DbId,
        input: &CreateButton,
    ) -> Result<Button, RepoError> {
        let mut tx = pool.begin().await?;
        SequenceRepo::lock_group(&mut tx, group_id).await?;
        let sequence_number = SequenceRepo::next_sequence_number(&mut tx, BUTTONS, group_id).await?;

        let query = format!(
            "INSERT INTO buttons (group_id, text, payload, sequence_number)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let button = sqlx::query_as::<_, Button>(&query)
            .bind(group_id)
            .bind(&input.text)
            .bind(&input.payload)
            .bind(sequence_number)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(button)
    }

    /// Find a button of a group by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        group_id: DbId,
        id: DbId,
    ) -> Result<Option<Button>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM buttons WHERE id = $1 AND group_id = $2");
        sqlx::query_as::<_, Button>(&query)
            .bind(id)
            .bind(group_id)
            .fetch_optional(pool)
            .await
    }

    /// List a group's buttons in sequence order.
    pub async fn list_by_group(
        executor: impl PgExecutor<'_>,
        group_id: DbId,
    ) -> Result<Vec<Button>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM buttons WHERE group_id = $1 ORDER BY sequence_number");
        sqlx::query_as::<_, Button>(&query)
            .bind(group_id)
            .fetch_all(executor)
            .await
    }

    /// Replace a button's text and payload. Returns `None` if not found.
    pub async fn update(
        pool: &PgPool,
        group_id: DbId,
        id: DbId,
        input: &UpdateButton,
    ) -> Result<Option<Button>, sqlx::Error> {
        let query = format!(
            "UPDATE buttons SET text = $3, payload = $4
             WHERE id = $1 AND group_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Button>(&query)
            .bind(id)
            .bind(group_id)
            .bind(&input.text)
            .bind(&input.payload)
            .fetch_optional(pool)
            .await
    }

    /// Point a button at another group, or clear its destination.
    ///
    /// The caller checks that the destination belongs to the same project.
    pub async fn set_destination(
        pool: &PgPool,
        group_id: DbId,
        id: DbId,
        destination_group_id: Option<DbId>,
    ) -> Result<Option<Button>, sqlx::Error> {
        let query = format!(
            "UPDATE buttons SET destination_group_id = $3
             WHERE id = $1 AND group_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Button>(&query)
            .bind(id)
            .bind(group_id)
            .bind(destination_group_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a button and close the gap it leaves. Returns `true` if removed.
    pub async fn delete(pool: &PgPool, group_id: DbId, id: DbId) -> Result<bool, RepoError> {
        SequenceRepo::delete_and_compact(pool, BUTTONS, group_id, id).await
    }

    /// Reorder every button of the group.
    pub async fn change_sequence(
        pool: &PgPool,
        group_id: DbId,
        proposed: &[SequenceAssignment],
    ) -> Result<Vec<SequenceAssignment>, RepoError> {
        SequenceRepo::change_sequence(pool, BUTTONS, group_id, proposed).await
    }
}
