//! User service for user CRUD operations.

use log::{debug, info};
use mongodb::Database;
use std::sync::Arc;

use crate::models::{UserChanges, UserFields, UserInput, UserResponse};
use crate::repositories::{MongoUserStore, StoreError, UserStore};
use crate::utils::mask_email;

pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    /// Create a service backed by the `users` collection of `db`.
    pub fn new(db: &Database) -> Self {
        Self::with_store(Arc::new(MongoUserStore::new(db)))
    }

    /// Create a service over any store implementation.
    pub fn with_store(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_users(&self) -> Result<Vec<UserResponse>, StoreError> {
        let users = self.store.find_all().await?;
        debug!("Fetched {} users", users.len());
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<UserResponse>, StoreError> {
        debug!("Fetching user by ID: {}", id);
        Ok(self.store.find_by_id(id).await?.map(UserResponse::from))
    }

    pub async fn create_user(&self, input: UserInput) -> Result<UserResponse, StoreError> {
        let fields = UserFields::try_from(input)?;
        info!("Creating user with email: {}", mask_email(&fields.email));
        let user = self.store.insert(fields).await?;
        Ok(user.into())
    }

    /// Set the submitted fields on a user and remove cleared ones.
    /// `Ok(None)` means no user has `id`.
    pub async fn update_user(
        &self,
        id: &str,
        input: UserInput,
    ) -> Result<Option<UserResponse>, StoreError> {
        let changes = UserChanges::try_from(input)?;
        info!("Updating user profile for user_id: {}", id);
        Ok(self.store.update(id, changes).await?.map(UserResponse::from))
    }

    /// Remove a user. `Ok(false)` means no user has `id`.
    pub async fn delete_user(&self, id: &str) -> Result<bool, StoreError> {
        info!("Deleting user account for user_id: {}", id);
        self.store.delete(id).await
    }
}
