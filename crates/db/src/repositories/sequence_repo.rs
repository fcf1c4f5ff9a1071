//! Ordering operations shared by every sequenced table (`actions`, `buttons`).
//!
//! All mutating operations run in one transaction that starts by locking the
//! owning group row, so appends, reorders and deletes within a group are
//! serialized while different groups never contend.

use chatflow_core::error::CoreError;
use chatflow_core::sequencing::{self, SequenceAssignment};
use chatflow_core::types::{DbId, SequenceNumber};
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::RepoError;

/// A table whose rows are ordered per `group_id` by `sequence_number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencedTable {
    /// Table name, interpolated into queries. Never user input.
    pub table: &'static str,
    /// Entity name used in not-found errors and logs.
    pub entity: &'static str,
}

pub const ACTIONS: SequencedTable = SequencedTable {
    table: "actions",
    entity: "Action",
};

pub const BUTTONS: SequencedTable = SequencedTable {
    table: "buttons",
    entity: "Button",
};

/// Provides the append / reorder / delete protocol for sequenced tables.
pub struct SequenceRepo;

impl SequenceRepo {
    /// Lock the group row for the rest of the transaction.
    ///
    /// Fails with `NotFound` if the group does not exist (or was deleted
    /// after the caller resolved it).
    pub async fn lock_group(
        tx: &mut Transaction<'_, Postgres>,
        group_id: DbId,
    ) -> Result<(), RepoError> {
        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM groups WHERE id = $1 FOR UPDATE")
                .bind(group_id)
                .fetch_optional(&mut **tx)
                .await?;
        match locked {
            Some(_) => Ok(()),
            None => Err(CoreError::NotFound {
                entity: "Group",
                id: group_id,
            }
            .into()),
        }
    }

    /// Sequence number for a new item appended to `group_id`.
    ///
    /// Must be called after [`Self::lock_group`] in the same transaction.
    pub async fn next_sequence_number(
        tx: &mut Transaction<'_, Postgres>,
        table: SequencedTable,
        group_id: DbId,
    ) -> Result<SequenceNumber, RepoError> {
        let query = format!("SELECT COUNT(*) FROM {} WHERE group_id = $1", table.table);
        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(group_id)
            .fetch_one(&mut **tx)
            .await?;
        Ok(sequencing::next_sequence_number(count)?)
    }

    /// Current `(id, sequence_number)` pairs of a group, ascending.
    pub async fn list(
        pool: &PgPool,
        table: SequencedTable,
        group_id: DbId,
    ) -> Result<Vec<SequenceAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT id, sequence_number FROM {} WHERE group_id = $1 ORDER BY sequence_number",
            table.table
        );
        let rows: Vec<(DbId, SequenceNumber)> =
            sqlx::query_as(&query).bind(group_id).fetch_all(pool).await?;
        Ok(rows.into_iter().map(to_assignment).collect())
    }

    /// Validate and apply a full reorder of a group.
    ///
    /// Either every sequence number named in `proposed` is written or none
    /// is. Returns the resulting pairs in ascending order.
    pub async fn change_sequence(
        pool: &PgPool,
        table: SequencedTable,
        group_id: DbId,
        proposed: &[SequenceAssignment],
    ) -> Result<Vec<SequenceAssignment>, RepoError> {
        let mut tx = pool.begin().await?;
        Self::lock_group(&mut tx, group_id).await?;

        let current = Self::ordered_ids(&mut tx, table, group_id).await?;
        sequencing::validate_reorder(&current, proposed).map_err(CoreError::from)?;

        Self::apply(&mut tx, table, group_id, proposed).await?;
        let result = Self::assignments(&mut tx, table, group_id).await?;
        tx.commit().await?;

        tracing::debug!(
            entity = table.entity,
            %group_id,
            count = result.len(),
            "Applied sequence change"
        );
        Ok(result)
    }

    /// Delete one item and renumber the survivors to `1..=N`.
    ///
    /// Returns `false` (and changes nothing) if no item `id` exists in the group.
    pub async fn delete_and_compact(
        pool: &PgPool,
        table: SequencedTable,
        group_id: DbId,
        id: DbId,
    ) -> Result<bool, RepoError> {
        let mut tx = pool.begin().await?;
        Self::lock_group(&mut tx, group_id).await?;

        let query = format!(
            "DELETE FROM {} WHERE id = $1 AND group_id = $2",
            table.table
        );
        let deleted = sqlx::query(&query)
            .bind(id)
            .bind(group_id)
            .execute(&mut *tx)
            .await?;
        if deleted.rows_affected() == 0 {
            return Ok(false);
        }

        let remaining = Self::ordered_ids(&mut tx, table, group_id).await?;
        Self::apply(&mut tx, table, group_id, &sequencing::compacted(&remaining)).await?;
        tx.commit().await?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn ordered_ids(
        tx: &mut Transaction<'_, Postgres>,
        table: SequencedTable,
        group_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let query = format!(
            "SELECT id FROM {} WHERE group_id = $1 ORDER BY sequence_number, created_at",
            table.table
        );
        let rows: Vec<(DbId,)> = sqlx::query_as(&query)
            .bind(group_id)
            .fetch_all(&mut **tx)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn assignments(
        tx: &mut Transaction<'_, Postgres>,
        table: SequencedTable,
        group_id: DbId,
    ) -> Result<Vec<SequenceAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT id, sequence_number FROM {} WHERE group_id = $1 ORDER BY sequence_number",
            table.table
        );
        let rows: Vec<(DbId, SequenceNumber)> = sqlx::query_as(&query)
            .bind(group_id)
            .fetch_all(&mut **tx)
            .await?;
        Ok(rows.into_iter().map(to_assignment).collect())
    }

    /// Overwrite sequence numbers in one statement. Uniqueness is checked
    /// at commit (`DEFERRABLE INITIALLY DEFERRED`).
    async fn apply(
        tx: &mut Transaction<'_, Postgres>,
        table: SequencedTable,
        group_id: DbId,
        assignments: &[SequenceAssignment],
    ) -> Result<(), sqlx::Error> {
        if assignments.is_empty() {
            return Ok(());
        }
        let ids: Vec<DbId> = assignments.iter().map(|a| a.id).collect();
        let numbers: Vec<SequenceNumber> = assignments.iter().map(|a| a.sequence_number).collect();

        let query = format!(
            "UPDATE {} AS t SET sequence_number = v.sequence_number \
             FROM UNNEST($2::uuid[], $3::int4[]) AS v(id, sequence_number) \
             WHERE t.id = v.id AND t.group_id = $1",
            table.table
        );
        sqlx::query(&query)
            .bind(group_id)
            .bind(ids)
            .bind(numbers)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}

fn to_assignment((id, sequence_number): (DbId, SequenceNumber)) -> SequenceAssignment {
    SequenceAssignment {
        id,
        sequence_number,
    }
}
