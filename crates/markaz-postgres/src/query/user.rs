//! User repository for managing login accounts.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewUser, UpdateUser, User};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for user account database operations.
///
/// Handles account lifecycle management including authentication lookups
/// and profile management.
pub trait UserRepository {
    /// Creates a new user account.
    ///
    /// The username is normalized (trimmed, lowercased) before insertion so
    /// that lookups stay case-insensitive.
    fn create_user(&mut self, new_user: NewUser) -> impl Future<Output = PgResult<User>> + Send;

    /// Finds a user by its unique identifier.
    fn find_user_by_id(
        &mut self,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Finds a user by username.
    ///
    /// Username comparison is case-insensitive.
    fn find_user_by_username(
        &mut self,
        username: &str,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Updates a user with new information.
    ///
    /// Applies partial updates to an existing account. Only fields set
    /// to `Some(value)` will be modified.
    fn update_user(
        &mut self,
        user_id: Uuid,
        updates: UpdateUser,
    ) -> impl Future<Output = PgResult<User>> + Send;

    /// Checks if a username is already registered in the system.
    fn username_exists(&mut self, username: &str) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists all user accounts with pagination support.
    ///
    /// Accounts are ordered by creation time with most recent first.
    fn list_users(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<User>>> + Send;
}

impl UserRepository for PgConnection {
    async fn create_user(&mut self, mut new_user: NewUser) -> PgResult<User> {
        use schema::users;

        // Normalize fields: trim whitespace, lowercase the username
        new_user.username = new_user.username.trim().to_lowercase();
        new_user.display_name = new_user.display_name.trim().to_owned();

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_user_by_id(&mut self, user_id: Uuid) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::id.eq(user_id))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_user_by_username(&mut self, username: &str) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::username.eq(username.trim().to_lowercase()))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn update_user(&mut self, user_id: Uuid, mut updates: UpdateUser) -> PgResult<User> {
        use schema::users::{self, dsl};

        // Normalize fields: trim whitespace
        if let Some(name) = updates.display_name.as_mut() {
            *name = name.trim().to_owned();
        }
        if updates.updated_at.is_none() {
            updates.updated_at = Some(jiff::Timestamp::now().into());
        }

        diesel::update(users::table.filter(dsl::id.eq(user_id)))
            .set(&updates)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn username_exists(&mut self, username: &str) -> PgResult<bool> {
        use schema::users::{self, dsl};

        let count: i64 = users::table
            .filter(dsl::username.eq(username.trim().to_lowercase()))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(count > 0)
    }

    async fn list_users(&mut self, pagination: Pagination) -> PgResult<Vec<User>> {
        use schema::users::{self, dsl};

        users::table
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(User::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
