//! Repository for the `actions` table and its per-type satellite tables.
//!
//! Reads fetch the base row left-joined with every satellite table and
//! narrow by discriminator. Writes touch the base row and exactly one
//! satellite row in the same transaction.

use chatflow_core::actions::ActionPayload;
use chatflow_core::error::CoreError;
use chatflow_core::sequencing::SequenceAssignment;
use chatflow_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::error::RepoError;
use crate::models::action::{Action, ActionRow};
use crate::repositories::sequence_repo::{SequenceRepo, ACTIONS};

/// Column list for [`ActionRow`], relative to [`JOINED`].
const COLUMNS: &str = "a.id, a.group_id, a.action_type, a.sequence_number, a.created_at, \
    tm.text, im.image_path";

/// Base table joined with one satellite table per action type.
const JOINED: &str = "actions a \
    LEFT JOIN text_message_actions tm ON tm.action_id = a.id \
    LEFT JOIN image_message_actions im ON im.action_id = a.id";

/// Provides CRUD and ordering operations for actions.
pub struct ActionRepo;

impl ActionRepo {
    /// Append a new action at the end of the group.
    pub async fn create(
        pool: &PgPool,
        group_id: DbId,
        payload: &ActionPayload,
    ) -> Result<Action, RepoError> {
        let mut tx = pool.begin().await?;
        SequenceRepo::lock_group(&mut tx, group_id).await?;
        let sequence_number = SequenceRepo::next_sequence_number(&mut tx, ACTIONS, group_id).await?;

        let (id, created_at): (DbId, Timestamp) = sqlx::query_as(
            "INSERT INTO actions (group_id, action_type, sequence_number)
             VALUES ($1, $2, $3)
             RETURNING id, created_at",
        )
        .bind(group_id)
        .bind(payload.action_type().as_str())
        .bind(sequence_number)
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_variant(&mut tx, id, payload).await?;
        tx.commit().await?;

        Ok(Action {
            id,
            group_id,
            sequence_number,
            created_at,
            payload: payload.clone(),
        })
    }

    /// Find an action of a group by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        group_id: DbId,
        id: DbId,
    ) -> Result<Option<Action>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM {JOINED} WHERE a.id = $1 AND a.group_id = $2");
        let row = sqlx::query_as::<_, ActionRow>(&query)
            .bind(id)
            .bind(group_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(ActionRow::into_action).transpose()?)
    }

    /// List a group's actions in sequence order.
    pub async fn list_by_group(
        executor: impl PgExecutor<'_>,
        group_id: DbId,
    ) -> Result<Vec<Action>, RepoError> {
        let query = format!(
            "SELECT {COLUMNS} FROM {JOINED} WHERE a.group_id = $1 ORDER BY a.sequence_number"
        );
        let rows = sqlx::query_as::<_, ActionRow>(&query)
            .bind(group_id)
            .fetch_all(executor)
            .await?;
        rows.into_iter()
            .map(|row| row.into_action().map_err(RepoError::from))
            .collect()
    }

    /// Replace the variant fields of an action.
    ///
    /// Returns `None` if no action `id` exists in the group. Fails with
    /// `TypeMismatch` if `payload` names a different type than the stored
    /// action. Never touches `sequence_number`, `created_at` or `type`.
    pub async fn update(
        pool: &PgPool,
        group_id: DbId,
        id: DbId,
        payload: &ActionPayload,
    ) -> Result<Option<Action>, RepoError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM {JOINED} WHERE a.id = $1 AND a.group_id = $2 FOR UPDATE OF a"
        );
        let Some(row) = sqlx::query_as::<_, ActionRow>(&query)
            .bind(id)
            .bind(group_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        payload.ensure_type(row.action_type)?;
        Self::update_variant(&mut tx, id, payload).await?;
        tx.commit().await?;

        let mut action = row.into_action()?;
        action.payload = payload.clone();
        Ok(Some(action))
    }

    /// Delete an action and close the gap it leaves. Returns `true` if removed.
    pub async fn delete(pool: &PgPool, group_id: DbId, id: DbId) -> Result<bool, RepoError> {
        SequenceRepo::delete_and_compact(pool, ACTIONS, group_id, id).await
    }

    /// Reorder every action of the group.
    pub async fn change_sequence(
        pool: &PgPool,
        group_id: DbId,
        proposed: &[SequenceAssignment],
    ) -> Result<Vec<SequenceAssignment>, RepoError> {
        SequenceRepo::change_sequence(pool, ACTIONS, group_id, proposed).await
    }

    // -----------------------------------------------------------------------
    // Variant-specific writes
    // -----------------------------------------------------------------------

    async fn insert_variant(
        tx: &mut Transaction<'_, Postgres>,
        action_id: DbId,
        payload: &ActionPayload,
    ) -> Result<(), sqlx::Error> {
        match payload {
            ActionPayload::TextMessage(fields) => {
                sqlx::query("INSERT INTO text_message_actions (action_id, text) VALUES ($1, $2)")
                    .bind(action_id)
                    .bind(&fields.text)
                    .execute(&mut **tx)
                    .await?
            }
            ActionPayload::ImageMessage(fields) => {
                sqlx::query(
                    "INSERT INTO image_message_actions (action_id, image_path) VALUES ($1, $2)",
                )
                .bind(action_id)
                .bind(&fields.image_path)
                .execute(&mut **tx)
                .await?
            }
        };
        Ok(())
    }

    async fn update_variant(
        tx: &mut Transaction<'_, Postgres>,
        action_id: DbId,
        payload: &ActionPayload,
    ) -> Result<(), RepoError> {
        let result = match payload {
            ActionPayload::TextMessage(fields) => {
                sqlx::query("UPDATE text_message_actions SET text = $2 WHERE action_id = $1")
                    .bind(action_id)
                    .bind(&fields.text)
                    .execute(&mut **tx)
                    .await?
            }
            ActionPayload::ImageMessage(fields) => {
                sqlx::query(
                    "UPDATE image_message_actions SET image_path = $2 WHERE action_id = $1",
                )
                .bind(action_id)
                .bind(&fields.image_path)
                .execute(&mut **tx)
                .await?
            }
        };
        if result.rows_affected() != 1 {
            return Err(CoreError::Internal(format!(
                "action {action_id} has no {} payload row",
                payload.action_type()
            ))
            .into());
        }
        Ok(())
    }
}
