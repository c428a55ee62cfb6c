//! User profile response types.

use jiff::Timestamp;
use markaz_postgres::model::User;
use markaz_postgres::types::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a user account, without credential material.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique identifier of the account.
    pub user_id: Uuid,
    /// Login name of the account.
    pub username: String,
    /// Display name of the account holder.
    pub display_name: String,
    /// Role determining the account's permission level.
    pub role: UserRole,

    /// Contact phone number (optional).
    pub phone_number: Option<String>,
    /// Contact email address (optional).
    pub email_address: Option<String>,
    /// Postal address (optional).
    pub address: Option<String>,
    /// Age in years (optional).
    pub age: Option<i32>,

    /// Timestamp when the account was created.
    pub created_at: Timestamp,
    /// Timestamp when the account was last updated.
    pub updated_at: Timestamp,
}

impl UserProfile {
    pub fn from_model(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            display_name: user.display_name,
            role: user.role,

            phone_number: user.phone_number,
            email_address: user.email_address,
            address: user.address,
            age: user.age,

            created_at: user.created_at.into(),
            updated_at: user.updated_at.into(),
        }
    }
}

impl From<User> for UserProfile {
    #[inline]
    fn from(user: User) -> Self {
        Self::from_model(user)
    }
}
