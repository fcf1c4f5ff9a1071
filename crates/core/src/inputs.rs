//! Free-form user input expected by a group.
//!
//! Inputs are not sequenced. A group holds at most one input per
//! [`InputType`]; the database enforces this with `uq_inputs_group_type`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kind of value the bot expects the user to type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Int,
    Email,
    PhoneNumber,
    Any,
}

impl InputType {
    pub const ALL: [InputType; 4] = [
        InputType::Int,
        InputType::Email,
        InputType::PhoneNumber,
        InputType::Any,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Int => "int",
            InputType::Email => "email",
            InputType::PhoneNumber => "phone_number",
            InputType::Any => "any",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown input type '{s}'")))
    }
}

impl TryFrom<String> for InputType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Conflict raised when a group already has an input of `input_type`.
pub fn duplicate_input_type(input_type: InputType) -> CoreError {
    CoreError::Conflict(format!(
        "group already has an input of type '{input_type}'"
    ))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_every_type() {
        for t in InputType::ALL {
            assert_eq!(t.as_str().parse::<InputType>().unwrap(), t);
        }
    }

    #[test]
    fn rejects_unknown_type() {
        assert_matches!("date".parse::<InputType>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&InputType::PhoneNumber).unwrap();
        assert_eq!(json, "\"phone_number\"");
    }

    #[test]
    fn duplicate_message_names_type() {
        assert_matches!(
            duplicate_input_type(InputType::Email),
            CoreError::Conflict(msg) if msg.contains("email")
        );
    }
}
