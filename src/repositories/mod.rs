//! Repository layer for database operations.
//!
//! Handlers and services talk to the `UserStore` port; `MongoUserStore` is
//! the production adapter and `InMemoryUserStore` backs the test suite.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::fmt;

use crate::models::{User, UserChanges, UserFields};

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod user_repository;

#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemoryUserStore;
pub use user_repository::MongoUserStore;

/// Errors raised by user store adapters.
///
/// The `Display` output is what clients receive in the `error` field, so it
/// reads like the database's own messages.
#[derive(Debug)]
pub enum StoreError {
    /// The identifier is not a valid ObjectId.
    InvalidId(String),
    /// A field value could not be converted to the type stored at `path`.
    Cast {
        kind: &'static str,
        path: &'static str,
        value: String,
        value_type: &'static str,
    },
    /// A document could not be encoded or decoded.
    Serialization(String),
    Database(mongodb::error::Error),
    /// The store cannot serve requests.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidId(id) => write!(
                f,
                "Cast to ObjectId failed for value \"{}\" (type string) at path \"_id\" for model \"User\"",
                id
            ),
            StoreError::Cast {
                kind,
                path,
                value,
                value_type,
            } => write!(
                f,
                "Cast to {} failed for value \"{}\" (type {}) at path \"{}\"",
                kind, value, value_type, path
            ),
            StoreError::Serialization(message) | StoreError::Unavailable(message) => {
                write!(f, "{}", message)
            }
            StoreError::Database(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err)
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Parse a path identifier the way the store would, rejecting anything that
/// is not a 24-character hex ObjectId.
pub fn parse_user_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Persistence port for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every stored user, in whatever order the store returns them.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user; the store assigns the identifier.
    async fn insert(&self, fields: UserFields) -> Result<User, StoreError>;

    /// Set and unset the given fields on an existing user and return the
    /// updated record, or `None` if no user has that identifier.
    async fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>, StoreError>;

    /// Remove a user. Returns `false` if no user has that identifier.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}
