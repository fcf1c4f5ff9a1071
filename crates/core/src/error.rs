use crate::actions::ActionType;
use crate::sequencing::SequenceError;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error("Unknown action type: {0}")]
    UnknownActionType(String),

    #[error("Action type mismatch: action is {stored}, update is {requested}")]
    TypeMismatch {
        stored: ActionType,
        requested: ActionType,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
