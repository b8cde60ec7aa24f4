//! User-related response models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use utoipa::ToSchema;

use crate::models::user::extra_to_json;
use crate::models::User;

// Largest integer a JSON client can represent exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// User data returned in API responses
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct UserResponse {
    /// Identifier assigned by the database
    #[serde(rename = "_id")]
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    /// Display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// Email address
    #[schema(example = "john@example.com")]
    pub email: String,
    /// Age, if one was stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>, example = 30)]
    pub age: Option<Number>,
    /// Any other stored attributes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.fields.name,
            email: user.fields.email,
            age: user.fields.age.and_then(age_to_json),
            extra: extra_to_json(user.fields.extra),
        }
    }
}

/// Integral ages render as JSON integers, everything else as a float.
fn age_to_json(age: f64) -> Option<Number> {
    if age.fract() == 0.0 && age.abs() <= MAX_SAFE_INTEGER {
        Some(Number::from(age as i64))
    } else {
        Number::from_f64(age)
    }
}
