//! Request validation glue between `validator` derives and [`CoreError`].

use validator::Validate;

use crate::error::CoreError;

/// Maximum length of a project or group name, in characters.
pub const MAX_NAME_LEN: u64 = 256;

/// Run the `validator` rules of `input`, folding all field errors into a
/// single [`CoreError::Validation`].
pub fn validate_request<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(errors.to_string()))
}
