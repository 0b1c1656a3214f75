//! User repository backed by the `userdetails` table.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set,
};
use thiserror::Error;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Failures reported by the user store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No user matched the lookup key
    #[error("user not found")]
    NotFound,

    /// Constraint violation or backend failure
    #[error(transparent)]
    Persistence(#[from] DbErr),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

/// User repository trait for dependency injection.
///
/// Lookups report a missing row as [`StoreError::NotFound`].
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the assigned id
    async fn save_user(&self, user: NewUser) -> Result<i64, StoreError>;

    /// Find a user by username.
    ///
    /// `Ok(None)` is not produced by [`UserStore`]; callers treat it like
    /// `NotFound` in case another backend returns it.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Find a user by id
    async fn get_user_by_id(&self, id: i64) -> Result<User, StoreError>;

    /// Report the active flag of a user
    async fn is_user_active(&self, id: i64) -> Result<bool, StoreError>;

    /// Set the active flag of a user
    async fn set_user_status(&self, id: i64, active: bool) -> Result<(), StoreError>;
}

/// SeaORM implementation of [`UserRepository`].
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i64) -> Result<user::Model, StoreError> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn save_user(&self, new_user: NewUser) -> Result<i64, StoreError> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            username: Set(new_user.username),
            password: Set(new_user.password),
            address: Set(new_user.address),
            pincode: Set(new_user.pincode),
            phone_number: Set(new_user.phone_number),
            mail: Set(new_user.mail),
            status: Set(true),
            is_admin: Set(new_user.is_admin),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(model.id)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let model = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)?;

        Ok(Some(User::from(model)))
    }

    async fn get_user_by_id(&self, id: i64) -> Result<User, StoreError> {
        self.find_model(id).await.map(User::from)
    }

    async fn is_user_active(&self, id: i64) -> Result<bool, StoreError> {
        self.find_model(id).await.map(|model| model.status)
    }

    async fn set_user_status(&self, id: i64, active: bool) -> Result<(), StoreError> {
        let mut model: ActiveModel = self.find_model(id).await?.into();
        model.status = Set(active);
        model.updated_at = Set(chrono::Utc::now());

        model.update(&self.db).await?;
        Ok(())
    }
}
