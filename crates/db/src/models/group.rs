//! Group (conversation node) entity model and DTOs.

use chatflow_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::action::Action;
use crate::models::button::Button;
use crate::models::input::Input;

/// A group row from the `groups` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Group {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new group inside a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroup {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
}

/// DTO for renaming a group.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGroup {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
}

/// A group together with everything it owns, each collection in display order.
#[derive(Debug, Clone, Serialize)]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: Group,
    pub actions: Vec<Action>,
    pub buttons: Vec<Button>,
    pub inputs: Vec<Input>,
}
