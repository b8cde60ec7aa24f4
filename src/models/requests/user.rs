//! User-related request models.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::Validate;

use crate::constants::ERR_NAME_AND_EMAIL_REQUIRED;
use crate::errors::ApiError;
use crate::validators::required_fields_error;

/// Request payload for creating or updating a user.
///
/// `name` and `email` are required and must not be empty. Any other field is
/// accepted and stored as submitted.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserPayload {
    /// Display name
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name must not be empty")
    )]
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    /// Email address (not checked for uniqueness)
    #[validate(
        required(message = "email is required"),
        length(min = 1, message = "email must not be empty")
    )]
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
    /// Age; numbers and numeric strings are accepted, `null` or `""` clears it
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>, example = 30)]
    pub age: Option<Value>,
    /// Additional attributes stored alongside the user
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Keep an explicit `null` as `Some(Value::Null)` so it can be told apart
/// from an absent field.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A payload whose required fields have been checked.
#[derive(Debug)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub age: Option<Value>,
    pub extra: Map<String, Value>,
}

impl UserPayload {
    /// Check that `name` and `email` are present and non-empty.
    pub fn validated(self) -> Result<UserInput, ApiError> {
        self.validate().map_err(required_fields_error)?;

        match (self.name, self.email) {
            (Some(name), Some(email)) => Ok(UserInput {
                name,
                email,
                age: self.age,
                extra: self.extra,
            }),
            _ => Err(ApiError::BadRequest(ERR_NAME_AND_EMAIL_REQUIRED.to_string())),
        }
    }
}
