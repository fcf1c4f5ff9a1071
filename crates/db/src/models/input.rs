//! Input entity model and DTOs.

use chatflow_core::inputs::InputType;
use chatflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An input row from the `inputs` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Input {
    pub id: DbId,
    pub group_id: DbId,
    #[serde(rename = "type")]
    #[sqlx(try_from = "String")]
    pub input_type: InputType,
    pub destination_group_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a new input.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInput {
    #[serde(rename = "type")]
    pub input_type: InputType,
}
