//! Ordering rules for sibling collections (actions and buttons of a group).
//!
//! Within a group the live items carry sequence numbers that form exactly
//! `1..=N`. New items are appended at `N + 1`, a reorder must restate the
//! position of every live item, and deletes renumber the survivors.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, SequenceNumber};

/// Sequence number given to the first item of a group.
pub const FIRST_SEQUENCE_NUMBER: SequenceNumber = 1;

/// One `(item id, position)` pair of a reorder request or result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceAssignment {
    pub id: DbId,
    pub sequence_number: SequenceNumber,
}

/// Reasons a reorder request is rejected. Checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    #[error("Expected {expected} items in the group, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Item ids do not match the items in the group")]
    IdentitySetMismatch,

    #[error("Sequence numbers must be exactly 1..={expected_max}")]
    SequenceRangeInvalid { expected_max: usize },
}

/// Sequence number for an item appended to a group holding `live_count` items.
pub fn next_sequence_number(live_count: i64) -> Result<SequenceNumber, CoreError> {
    live_count
        .checked_add(1)
        .and_then(|n| SequenceNumber::try_from(n).ok())
        .filter(|n| *n >= FIRST_SEQUENCE_NUMBER)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "cannot append to a group holding {live_count} items"
            ))
        })
}

/// Validate a full reorder of a group.
///
/// `current_ids` are the ids of every live item in the group; `proposed`
/// must mention each of them exactly once and use each number of
/// `1..=current_ids.len()` exactly once.
pub fn validate_reorder(
    current_ids: &[DbId],
    proposed: &[SequenceAssignment],
) -> Result<(), SequenceError> {
    if proposed.len() != current_ids.len() {
        return Err(SequenceError::CountMismatch {
            expected: current_ids.len(),
            actual: proposed.len(),
        });
    }

    let mut expected_ids = current_ids.to_vec();
    expected_ids.sort_unstable();
    let mut proposed_ids: Vec<DbId> = proposed.iter().map(|a| a.id).collect();
    proposed_ids.sort_unstable();
    if proposed_ids != expected_ids {
        return Err(SequenceError::IdentitySetMismatch);
    }

    let mut numbers: Vec<SequenceNumber> = proposed.iter().map(|a| a.sequence_number).collect();
    numbers.sort_unstable();
    if !is_gapless(&numbers) {
        return Err(SequenceError::SequenceRangeInvalid {
            expected_max: current_ids.len(),
        });
    }

    Ok(())
}

/// Whether sorted `numbers` are exactly `1..=numbers.len()`.
pub fn is_gapless(numbers: &[SequenceNumber]) -> bool {
    numbers
        .iter()
        .zip(FIRST_SEQUENCE_NUMBER..)
        .all(|(actual, expected)| *actual == expected)
}

/// Assign `1..=N` to `ordered_ids`, keeping their relative order.
///
/// Used after a delete to close the gap left by the removed item.
pub fn compacted(ordered_ids: &[DbId]) -> Vec<SequenceAssignment> {
    ordered_ids
        .iter()
        .zip(FIRST_SEQUENCE_NUMBER..)
        .map(|(id, sequence_number)| SequenceAssignment {
            id: *id,
            sequence_number,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
