//! Button entity model and DTOs.

use chatflow_core::types::{DbId, SequenceNumber, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A button row from the `buttons` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Button {
    pub id: DbId,
    pub group_id: DbId,
    pub text: String,
    /// Opaque string handed back to the bot when the button is pressed.
    pub payload: String,
    pub sequence_number: SequenceNumber,
    pub destination_group_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a new button. The sequence number is assigned on insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateButton {
    #[validate(length(max = 64))]
    pub text: String,
    #[validate(length(max = 64))]
    pub payload: String,
}

/// DTO for replacing a button's label and payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateButton {
    #[validate(length(max = 64))]
    pub text: String,
    #[validate(length(max = 64))]
    pub payload: String,
}

/// DTO for pointing a button or input at another group. `null` clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct SetDestination {
    pub destination_group_id: Option<DbId>,
}
