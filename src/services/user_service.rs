use mongodb::bson::oid::ObjectId;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    models::{User, UserFields},
    services::user_store::UserStore,
    utils::AppError,
};

/// Fixed size of the leaderboard returned by `GET /users/top`.
pub const TOP_USERS_LIMIT: i64 = 10;

const USER_NOT_FOUND: &str = "User with specified ID not found!";

/// Request-scoped operations on users. Every store call runs under the same
/// timeout budget, and missing documents come back as `AppError::NotFound`.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    timeout: Duration,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, timeout: Duration) -> Self {
        UserService { store, timeout }
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout { operation, budget: self.timeout }),
        }
    }

    pub async fn create(&self, fields: UserFields) -> Result<ObjectId, AppError> {
        let user = User::new(fields);
        self.bounded("insert user", self.store.insert(&user)).await?;
        Ok(user.id)
    }

    pub async fn get(&self, id: ObjectId) -> Result<User, AppError> {
        self.bounded("find user", self.store.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    pub async fn update(&self, id: ObjectId, fields: UserFields) -> Result<User, AppError> {
        self.bounded("update user", self.store.update(id, &fields))
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    pub async fn delete(&self, id: ObjectId) -> Result<(), AppError> {
        if self.bounded("delete user", self.store.delete(id)).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(USER_NOT_FOUND.to_string()))
        }
    }

    pub async fn list_all(&self) -> Result<Vec<User>, AppError> {
        self.bounded("list users", self.store.list_all()).await
    }

    pub async fn list_top(&self) -> Result<Vec<User>, AppError> {
        self.bounded("list top users", self.store.list_top(TOP_USERS_LIMIT))
            .await
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.bounded("ping database", self.store.ping()).await
    }
}
