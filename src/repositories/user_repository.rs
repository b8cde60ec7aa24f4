//! MongoDB adapter for the user store.
//!
//! Wraps the `users` collection and translates the store operations into
//! driver calls.

use async_trait::async_trait;
use futures::TryStreamExt;
use log::debug;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use crate::constants::COLLECTION_USERS;
use crate::models::{User, UserChanges, UserFields};
use crate::repositories::{parse_user_id, StoreError, UserStore};

/// Repository for user-related database operations.
pub struct MongoUserStore {
    collection: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_USERS),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        debug!("Repository: Finding all users");
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        debug!("Repository: Finding user by ID: {}", id);
        let object_id = parse_user_id(id)?;
        Ok(self.collection.find_one(doc! { "_id": object_id }).await?)
    }

    async fn insert(&self, fields: UserFields) -> Result<User, StoreError> {
        let result = self
            .collection
            .clone_with_type::<UserFields>()
            .insert_one(&fields)
            .await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Serialization(format!(
                "Inserted document has a non-ObjectId _id: {}",
                result.inserted_id
            ))
        })?;
        debug!("Repository: Inserted user {}", id);
        Ok(User { id, fields })
    }

    async fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>, StoreError> {
        debug!("Repository: Updating user {}", id);
        let object_id = parse_user_id(id)?;
        let update = changes.to_update_document()?;
        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": object_id }, update)
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        debug!("Repository: Deleting user {}", id);
        let object_id = parse_user_id(id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": object_id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}
