//! Process-local user store used by tests.
//!
//! Behaves like the MongoDB adapter from the outside: identifiers are
//! ObjectIds, malformed identifiers are rejected, updates only touch the
//! submitted and cleared fields. `fail_with` switches every operation into an error so
//! the handlers' failure paths can be exercised.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::{Mutex, MutexGuard};

use crate::models::{User, UserChanges, UserFields};
use crate::repositories::{parse_user_id, StoreError, UserStore};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    failure: Option<String>,
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    state: Mutex<State>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with `message`.
    pub fn fail_with(&self, message: &str) {
        self.lock().failure = Some(message.to_string());
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking test thread must not poison the store for the others.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn checked(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        let state = self.lock();
        match &state.failure {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.checked()?.users.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let state = self.checked()?;
        let object_id = parse_user_id(id)?;
        Ok(state.users.iter().find(|u| u.id == object_id).cloned())
    }

    async fn insert(&self, fields: UserFields) -> Result<User, StoreError> {
        let mut state = self.checked()?;
        let user = User {
            id: ObjectId::new(),
            fields,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>, StoreError> {
        let mut state = self.checked()?;
        let object_id = parse_user_id(id)?;
        Ok(state
            .users
            .iter_mut()
            .find(|u| u.id == object_id)
            .map(|user| {
                user.apply(changes);
                user.clone()
            }))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut state = self.checked()?;
        let object_id = parse_user_id(id)?;
        let before = state.users.len();
        state.users.retain(|u| u.id != object_id);
        Ok(state.users.len() < before)
    }
}
