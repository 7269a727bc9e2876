use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path segment as a resource id.
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim()).map_err(|_| AppError::InvalidInput("Invalid UUID format".to_string()))
}
