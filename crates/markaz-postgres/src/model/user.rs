//! User account model for authentication and role-based access control.
//!
//! ## Models
//!
//! - [`User`] - Main user model with credentials and profile information
//! - [`NewUser`] - Data structure for creating new user accounts
//! - [`UpdateUser`] - Data structure for updating existing accounts

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::users;
use crate::types::UserRole;

/// Main user model representing an account in the center.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique account identifier.
    pub id: Uuid,
    /// Login name, unique across the center (stored lowercase).
    pub username: String,
    /// Argon2id password hash in PHC string format.
    pub password_hash: String,
    /// Human-readable name for UI and communications.
    pub display_name: String,
    /// Role determining the account's permission level.
    pub role: UserRole,
    /// Optional contact phone number.
    pub phone_number: Option<String>,
    /// Optional contact email address.
    pub email_address: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
    /// Optional age in years.
    pub age: Option<i32>,
    /// Timestamp when the account was created.
    pub created_at: Timestamp,
    /// Timestamp when the account was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new user account.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    /// Login name, unique across the center.
    pub username: String,
    /// Argon2id password hash in PHC string format.
    pub password_hash: String,
    /// Human-readable name for UI and communications.
    pub display_name: String,
    /// Role determining the account's permission level.
    pub role: UserRole,
    /// Optional contact phone number.
    pub phone_number: Option<String>,
    /// Optional contact email address.
    pub email_address: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
    /// Optional age in years.
    pub age: Option<i32>,
}

/// Data for updating a user account.
#[derive(Debug, Default, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateUser {
    /// Argon2id password hash in PHC string format.
    pub password_hash: Option<String>,
    /// Human-readable name for UI and communications.
    pub display_name: Option<String>,
    /// Role determining the account's permission level.
    pub role: Option<UserRole>,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Contact email address.
    pub email_address: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Age in years.
    pub age: Option<i32>,
    /// Timestamp when the account was last updated.
    pub updated_at: Option<Timestamp>,
}

impl User {
    /// Returns whether the account carries center-wide management privileges.
    #[inline]
    pub fn is_management(&self) -> bool {
        self.role.is_management()
    }

    /// Returns whether the account is an instructor.
    #[inline]
    pub fn is_instructor(&self) -> bool {
        self.role.is_instructor()
    }

    /// Returns whether the account has a phone number set.
    pub fn has_phone_number(&self) -> bool {
        self.phone_number
            .as_deref()
            .is_some_and(|phone_number| !phone_number.is_empty())
    }
}
