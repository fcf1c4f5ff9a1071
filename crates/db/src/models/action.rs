//! Action entity model.
//!
//! An action is stored as a row in `actions` (shared columns and the
//! discriminator) plus one row in the satellite table of its type. In memory
//! it is flat: the shared fields and an [`ActionPayload`].

use chatflow_core::actions::{ActionPayload, ActionType, ImageMessage, TextMessage};
use chatflow_core::error::CoreError;
use chatflow_core::types::{DbId, SequenceNumber, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An action with its variant fields, serialized as one flat object
/// tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub id: DbId,
    pub group_id: DbId,
    pub sequence_number: SequenceNumber,
    pub created_at: Timestamp,
    #[serde(flatten)]
    pub payload: ActionPayload,
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        self.payload.action_type()
    }
}

/// An `actions` row left-joined with every satellite table.
///
/// Exactly one of the variant columns is non-null for a consistent row.
#[derive(Debug, Clone, FromRow)]
pub struct ActionRow {
    pub id: DbId,
    pub group_id: DbId,
    #[sqlx(try_from = "String")]
    pub action_type: ActionType,
    pub sequence_number: SequenceNumber,
    pub created_at: Timestamp,
    pub text: Option<String>,
    pub image_path: Option<String>,
}

impl ActionRow {
    /// Narrow the joined row to the variant named by its discriminator.
    pub fn into_action(self) -> Result<Action, CoreError> {
        let missing = |ty: ActionType| {
            CoreError::Internal(format!("action {} has no {ty} payload row", self.id))
        };
        let payload = match self.action_type {
            ActionType::TextMessage => ActionPayload::TextMessage(TextMessage {
                text: self.text.clone().ok_or_else(|| missing(ActionType::TextMessage))?,
            }),
            ActionType::ImageMessage => ActionPayload::ImageMessage(ImageMessage {
                image_path: self
                    .image_path
                    .clone()
                    .ok_or_else(|| missing(ActionType::ImageMessage))?,
            }),
        };
        Ok(Action {
            id: self.id,
            group_id: self.group_id,
            sequence_number: self.sequence_number,
            created_at: self.created_at,
            payload,
        })
    }
}
