//! Bot action variants and the discriminator registry.
//!
//! An action is a bot output attached to a group. Every action carries a
//! `type` discriminator that selects its payload shape. [`ActionType`] is the
//! registry of known discriminators and [`ActionPayload`] the matching tagged
//! union. Adding a kind means adding one variant to each and one satellite
//! table in the database; list, reorder and delete never look at the kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::validation::validate_request;

/// Maximum length of a text message body, in characters.
pub const MAX_TEXT_LEN: u64 = 4096;

/// Maximum length of an image path, in characters.
pub const MAX_IMAGE_PATH_LEN: u64 = 4096;

// ---------------------------------------------------------------------------
// Discriminator
// ---------------------------------------------------------------------------

/// Discriminator of an action. Immutable once the action exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    TextMessage,
    ImageMessage,
}

impl ActionType {
    /// Every registered action type.
    pub const ALL: [ActionType; 2] = [ActionType::TextMessage, ActionType::ImageMessage];

    /// Wire and storage representation of the discriminator.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::TextMessage => "text_message",
            ActionType::ImageMessage => "image_message",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::UnknownActionType(s.to_string()))
    }
}

impl TryFrom<String> for ActionType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Fields of a `text_message` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TextMessage {
    #[validate(length(max = 4096))]
    pub text: String,
}

/// Fields of an `image_message` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ImageMessage {
    #[validate(length(max = 4096))]
    pub image_path: String,
}

/// Variant-specific part of an action, tagged by `type`.
///
/// Used as the body of both create and update requests: an update replaces
/// every variant field but must name the action's existing type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionPayload {
    TextMessage(TextMessage),
    ImageMessage(ImageMessage),
}

impl ActionPayload {
    /// Parse a request body, dispatching on its `type` field.
    ///
    /// A missing discriminator or malformed fields fail with
    /// [`CoreError::Validation`]; an unregistered discriminator fails with
    /// [`CoreError::UnknownActionType`].
    pub fn from_json(value: serde_json::Value) -> Result<Self, CoreError> {
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| {
                CoreError::Validation("action body must carry a string `type` field".to_string())
            })?;
        let action_type: ActionType = tag.parse()?;

        let payload: ActionPayload = serde_json::from_value(value).map_err(|e| {
            CoreError::Validation(format!("invalid {action_type} action: {e}"))
        })?;
        payload.validate()?;
        Ok(payload)
    }

    /// Discriminator of this payload.
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionPayload::TextMessage(_) => ActionType::TextMessage,
            ActionPayload::ImageMessage(_) => ActionType::ImageMessage,
        }
    }

    /// Check the variant's field limits.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            ActionPayload::TextMessage(fields) => validate_request(fields),
            ActionPayload::ImageMessage(fields) => validate_request(fields),
        }
    }

    /// Reject an update whose discriminator differs from the stored action's.
    pub fn ensure_type(&self, stored: ActionType) -> Result<(), CoreError> {
        let requested = self.action_type();
        if requested != stored {
            return Err(CoreError::TypeMismatch { stored, requested });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
