use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// GET /posts query string
#[derive(Debug, Default, Validate, Deserialize)]
pub struct ListPostsQuery {
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

#[derive(Debug, Validate, Deserialize)]
pub struct AddPostRequest {
    /// Client-chosen id, must be a UUID when present.
    #[validate(custom(function = "validate_uuid"))]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 32, message = "title must be 1-32 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

#[derive(Debug, Default, Validate, Deserialize)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 32, message = "title must be 1-32 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: Option<String>,
}

/// Accepts only the canonical hyphenated form (8-4-4-4-12 hex digits).
pub fn validate_uuid(id: &str) -> Result<(), ValidationError> {
    if id.len() == 36 && Uuid::parse_str(id).is_ok() {
        Ok(())
    } else {
        let mut err = ValidationError::new("uuid");
        err.message = Some(format!("'{}' is not a valid UUID", id).into());
        Err(err)
    }
}
