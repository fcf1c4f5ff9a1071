//! Integration tests for the append / reorder / delete protocol shared by
//! actions and buttons.

mod common;

use assert_matches::assert_matches;
use chatflow_core::error::CoreError;
use chatflow_core::sequencing::{is_gapless, SequenceAssignment, SequenceError};
use chatflow_db::repositories::sequence_repo::{ACTIONS, BUTTONS};
use chatflow_db::repositories::{ActionRepo, ButtonRepo, SequenceRepo};
use chatflow_db::RepoError;
use common::{add_group, assign, button, seed_group, text};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Append
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_appends_are_numbered_in_creation_order(pool: PgPool) {
    let group = seed_group(&pool).await;

    let mut created = Vec::new();
    for i in 0..5 {
        let action = ActionRepo::create(&pool, group.id, &text(&format!("line {i}")))
            .await
            .unwrap();
        created.push(action);
    }

    let numbers: Vec<i32> = created.iter().map(|a| a.sequence_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);

    let listed = ActionRepo::list_by_group(&pool, group.id).await.unwrap();
    assert_eq!(listed, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_append_to_missing_group_is_not_found(pool: PgPool) {
    let result = ButtonRepo::create(&pool, Uuid::new_v4(), &button("Yes")).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::NotFound { entity: "Group", .. }))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_appends_in_one_group_get_distinct_numbers(pool: PgPool) {
    let group = seed_group(&pool).await;

    let (first, second, third) = (button("A"), button("B"), button("C"));

    let (a, b, c) = tokio::join!(
        ButtonRepo::create(&pool, group.id, &first),
        ButtonRepo::create(&pool, group.id, &second),
        ButtonRepo::create(&pool, group.id, &third),
    );

    let mut numbers = vec![
        a.unwrap().sequence_number,
        b.unwrap().sequence_number,
        c.unwrap().sequence_number,
    ];
    numbers.sort_unstable();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_groups_are_numbered_independently(pool: PgPool) {
    let first = seed_group(&pool).await;
    let second = add_group(&pool, first.project_id, "Farewell").await;

    ButtonRepo::create(&pool, first.id, &button("A")).await.unwrap();
    ButtonRepo::create(&pool, first.id, &button("B")).await.unwrap();
    let other = ButtonRepo::create(&pool, second.id, &button("C")).await.unwrap();

    assert_eq!(other.sequence_number, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_actions_and_buttons_are_numbered_separately(pool: PgPool) {
    let group = seed_group(&pool).await;

    ActionRepo::create(&pool, group.id, &text("hi")).await.unwrap();
    ActionRepo::create(&pool, group.id, &text("there")).await.unwrap();
    let first_button = ButtonRepo::create(&pool, group.id, &button("Ok")).await.unwrap();

    assert_eq!(first_button.sequence_number, 1);
}

// ---------------------------------------------------------------------------
// ChangeSequence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_rotates_actions(pool: PgPool) {
    let group = seed_group(&pool).await;
    let a = ActionRepo::create(&pool, group.id, &text("A")).await.unwrap();
    let b = ActionRepo::create(&pool, group.id, &text("B")).await.unwrap();
    let c = ActionRepo::create(&pool, group.id, &text("C")).await.unwrap();

    let result = ActionRepo::change_sequence(
        &pool,
        group.id,
        &[assign(a.id, 3), assign(b.id, 1), assign(c.id, 2)],
    )
    .await
    .unwrap();
    assert_eq!(result, vec![assign(b.id, 1), assign(c.id, 2), assign(a.id, 3)]);

    let ids: Vec<Uuid> = ActionRepo::list_by_group(&pool, group.id)
        .await
        .unwrap()
        .into_iter()
        .map(|action| action.id)
        .collect();
    assert_eq!(ids, vec![b.id, c.id, a.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_is_idempotent(pool: PgPool) {
    let group = seed_group(&pool).await;
    let x = ButtonRepo::create(&pool, group.id, &button("X")).await.unwrap();
    let y = ButtonRepo::create(&pool, group.id, &button("Y")).await.unwrap();
    let proposed = [assign(x.id, 2), assign(y.id, 1)];

    let first = ButtonRepo::change_sequence(&pool, group.id, &proposed).await.unwrap();
    let after_first = ButtonRepo::list_by_group(&pool, group.id).await.unwrap();

    let second = ButtonRepo::change_sequence(&pool, group.id, &proposed).await.unwrap();
    let after_second = ButtonRepo::list_by_group(&pool, group.id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(after_first, after_second);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_with_duplicate_id_is_identity_mismatch(pool: PgPool) {
    let group = seed_group(&pool).await;
    let x = ButtonRepo::create(&pool, group.id, &button("X")).await.unwrap();
    ButtonRepo::create(&pool, group.id, &button("Y")).await.unwrap();

    let result =
        ButtonRepo::change_sequence(&pool, group.id, &[assign(x.id, 1), assign(x.id, 2)]).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::Sequence(
            SequenceError::IdentitySetMismatch
        )))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_out_of_range_is_rejected(pool: PgPool) {
    let group = seed_group(&pool).await;
    let a = ActionRepo::create(&pool, group.id, &text("A")).await.unwrap();
    let b = ActionRepo::create(&pool, group.id, &text("B")).await.unwrap();

    let result =
        ActionRepo::change_sequence(&pool, group.id, &[assign(a.id, 1), assign(b.id, 3)]).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::Sequence(
            SequenceError::SequenceRangeInvalid { expected_max: 2 }
        )))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_with_wrong_count_is_count_mismatch(pool: PgPool) {
    let group = seed_group(&pool).await;
    let a = ActionRepo::create(&pool, group.id, &text("A")).await.unwrap();
    ActionRepo::create(&pool, group.id, &text("B")).await.unwrap();

    let result = ActionRepo::change_sequence(&pool, group.id, &[assign(a.id, 1)]).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::Sequence(
            SequenceError::CountMismatch {
                expected: 2,
                actual: 1
            }
        )))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rejected_reorders_leave_state_unchanged(pool: PgPool) {
    let group = seed_group(&pool).await;
    let a = ActionRepo::create(&pool, group.id, &text("A")).await.unwrap();
    let b = ActionRepo::create(&pool, group.id, &text("B")).await.unwrap();
    let c = ActionRepo::create(&pool, group.id, &text("C")).await.unwrap();
    let before = SequenceRepo::list(&pool, ACTIONS, group.id).await.unwrap();

    let rejected = [
        vec![assign(a.id, 2), assign(b.id, 1)],
        vec![assign(a.id, 3), assign(b.id, 1), assign(Uuid::new_v4(), 2)],
        vec![assign(a.id, 3), assign(b.id, 3), assign(c.id, 1)],
    ];
    for proposed in rejected {
        assert!(ActionRepo::change_sequence(&pool, group.id, &proposed)
            .await
            .is_err());
        let after = SequenceRepo::list(&pool, ACTIONS, group.id).await.unwrap();
        assert_eq!(after, before);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_cannot_move_items_of_another_group(pool: PgPool) {
    let first = seed_group(&pool).await;
    let second = add_group(&pool, first.project_id, "Other").await;
    let mine = ButtonRepo::create(&pool, first.id, &button("Mine")).await.unwrap();
    let theirs = ButtonRepo::create(&pool, second.id, &button("Theirs")).await.unwrap();

    let result = ButtonRepo::change_sequence(&pool, first.id, &[assign(theirs.id, 1)]).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::Sequence(
            SequenceError::IdentitySetMismatch
        )))
    );

    let untouched = SequenceRepo::list(&pool, BUTTONS, first.id).await.unwrap();
    assert_eq!(untouched, vec![assign(mine.id, 1)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_of_empty_group_is_a_no_op(pool: PgPool) {
    let group = seed_group(&pool).await;
    let result = ActionRepo::change_sequence(&pool, group.id, &[]).await.unwrap();
    assert!(result.is_empty());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_renumbers_survivors(pool: PgPool) {
    let group = seed_group(&pool).await;
    let a = ButtonRepo::create(&pool, group.id, &button("A")).await.unwrap();
    let b = ButtonRepo::create(&pool, group.id, &button("B")).await.unwrap();
    let c = ButtonRepo::create(&pool, group.id, &button("C")).await.unwrap();

    assert!(ButtonRepo::delete(&pool, group.id, a.id).await.unwrap());

    let remaining = SequenceRepo::list(&pool, BUTTONS, group.id).await.unwrap();
    assert_eq!(remaining, vec![assign(b.id, 1), assign(c.id, 2)]);

    let appended = ButtonRepo::create(&pool, group.id, &button("D")).await.unwrap();
    assert_eq!(appended.sequence_number, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_keeps_reordered_positions(pool: PgPool) {
    let group = seed_group(&pool).await;
    let a = ActionRepo::create(&pool, group.id, &text("A")).await.unwrap();
    let b = ActionRepo::create(&pool, group.id, &text("B")).await.unwrap();
    let c = ActionRepo::create(&pool, group.id, &text("C")).await.unwrap();
    ActionRepo::change_sequence(
        &pool,
        group.id,
        &[assign(a.id, 3), assign(b.id, 1), assign(c.id, 2)],
    )
    .await
    .unwrap();

    assert!(ActionRepo::delete(&pool, group.id, b.id).await.unwrap());

    let remaining = SequenceRepo::list(&pool, ACTIONS, group.id).await.unwrap();
    assert_eq!(remaining, vec![assign(c.id, 1), assign(a.id, 2)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_of_missing_item_reports_false(pool: PgPool) {
    let group = seed_group(&pool).await;
    let a = ActionRepo::create(&pool, group.id, &text("A")).await.unwrap();

    assert!(!ActionRepo::delete(&pool, group.id, Uuid::new_v4()).await.unwrap());

    let remaining = SequenceRepo::list(&pool, ACTIONS, group.id).await.unwrap();
    assert_eq!(remaining, vec![assign(a.id, 1)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_through_wrong_group_reports_false(pool: PgPool) {
    let first = seed_group(&pool).await;
    let second = add_group(&pool, first.project_id, "Other").await;
    let a = ActionRepo::create(&pool, first.id, &text("A")).await.unwrap();

    assert!(!ActionRepo::delete(&pool, second.id, a.id).await.unwrap());
    assert!(ActionRepo::find_by_id(&pool, first.id, a.id)
        .await
        .unwrap()
        .is_some());
}

// ---------------------------------------------------------------------------
// Interleaved mutations
// ---------------------------------------------------------------------------

fn numbers(assignments: &[SequenceAssignment]) -> Vec<i32> {
    assignments.iter().map(|a| a.sequence_number).collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_racing_append_stays_gapless(pool: PgPool) {
    let group = seed_group(&pool).await;

    for round in 0..10 {
        let current = SequenceRepo::list(&pool, ACTIONS, group.id).await.unwrap();
        let count = current.len() as i32;
        let reversed: Vec<SequenceAssignment> = current
            .iter()
            .map(|a| assign(a.id, count + 1 - a.sequence_number))
            .collect();
        let appended = text(&format!("round {round}"));

        let (reorder, append) = tokio::join!(
            ActionRepo::change_sequence(&pool, group.id, &reversed),
            ActionRepo::create(&pool, group.id, &appended),
        );

        append.unwrap();
        // The reorder either wins the lock or sees the appended item and is
        // rejected for naming too few items.
        if let Err(err) = reorder {
            assert_matches!(
                err,
                RepoError::Core(CoreError::Sequence(SequenceError::CountMismatch { .. }))
            );
        }

        let after = SequenceRepo::list(&pool, ACTIONS, group.id).await.unwrap();
        assert_eq!(after.len(), round + 1);
        assert!(is_gapless(&numbers(&after)), "gap after round {round}: {after:?}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_racing_append_stays_gapless(pool: PgPool) {
    let group = seed_group(&pool).await;
    for label in ["A", "B", "C"] {
        ButtonRepo::create(&pool, group.id, &button(label)).await.unwrap();
    }

    for round in 0..5 {
        let current = SequenceRepo::list(&pool, BUTTONS, group.id).await.unwrap();
        let victim = current[current.len() / 2].id;
        let appended = button(&format!("R{round}"));

        let (deleted, created) = tokio::join!(
            ButtonRepo::delete(&pool, group.id, victim),
            ButtonRepo::create(&pool, group.id, &appended),
        );
        assert!(deleted.unwrap());
        created.unwrap();

        let after = SequenceRepo::list(&pool, BUTTONS, group.id).await.unwrap();
        assert_eq!(after.len(), 3);
        assert_eq!(numbers(&after), vec![1, 2, 3]);
    }
}
