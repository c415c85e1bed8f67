/// Request field presence checks
///
/// Input is only checked for presence: a field counts as missing when it is
/// absent from the body or blank.

use uuid::Uuid;

use crate::error::ValidationError;

/// Returns the value unchanged if it holds anything besides whitespace
pub fn require_present<'a>(field: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field.to_string()));
    }
    Ok(value)
}

/// Like `require_present`, for fields a partial update may leave out
pub fn require_present_if_set(
    field: &str,
    value: Option<String>,
) -> Result<Option<String>, ValidationError> {
    match value {
        Some(v) => {
            require_present(field, &v)?;
            Ok(Some(v))
        }
        None => Ok(None),
    }
}

/// Parses a user id path segment
pub fn parse_user_id(raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidId(raw.to_string()))
}
