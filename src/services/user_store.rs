// ==================== USER STORE ====================
// Persistence seam for the `users` collection. Handlers never see the
// driver directly; they go through UserService, which owns a UserStore.

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;

use crate::{
    database::{MongoDB, USERS_COLLECTION},
    models::{User, UserFields},
    utils::AppError,
};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> Result<(), AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError>;

    /// Sets `name` and `score` on the matching document and returns it as
    /// re-read after the write. `None` when nothing matched.
    async fn update(&self, id: ObjectId, fields: &UserFields) -> Result<Option<User>, AppError>;

    /// Returns whether a document was removed.
    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;

    async fn list_all(&self) -> Result<Vec<User>, AppError>;

    /// Highest scores first, at most `limit` users.
    async fn list_top(&self, limit: i64) -> Result<Vec<User>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

pub struct MongoUserStore {
    db: MongoDB,
    collection: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &MongoDB) -> Self {
        MongoUserStore {
            db: db.clone(),
            collection: db.collection::<User>(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: &User) -> Result<(), AppError> {
        self.collection.insert_one(user).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn update(&self, id: ObjectId, fields: &UserFields) -> Result<Option<User>, AppError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "name": fields.name.as_str(), "score": fields.score } },
            )
            .await?;

        if result.matched_count == 0 {
            return Ok(None);
        }

        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect::<Vec<User>>().await?)
    }

    async fn list_top(&self, limit: i64) -> Result<Vec<User>, AppError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "score": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect::<Vec<User>>().await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(self.db.ping().await?)
    }
}
