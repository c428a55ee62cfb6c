//! Student model.
//!
//! A student is a person enrolled at the center. A student may optionally be
//! linked to a login account (a `Learner` user) and to a study group.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::students;

/// A student enrolled at the center.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Student {
    /// Unique student identifier.
    pub id: Uuid,
    /// Full name of the student.
    pub full_name: String,
    /// Optional linked login account.
    pub user_id: Option<Uuid>,
    /// Optional group the student is enrolled in.
    pub group_id: Option<Uuid>,
    /// Optional postal address.
    pub address: Option<String>,
    /// Optional contact phone number.
    pub phone_number: Option<String>,
    /// Optional parent contact phone number.
    pub parent_phone_number: Option<String>,
    /// Optional age in years.
    pub age: Option<i32>,
    /// Reward coins earned for good scores.
    pub coins: i32,
    /// Timestamp when the student was enrolled.
    pub created_at: Timestamp,
}

/// Data for enrolling a new student.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewStudent {
    /// Full name of the student.
    pub full_name: String,
    /// Optional linked login account.
    pub user_id: Option<Uuid>,
    /// Optional group the student is enrolled in.
    pub group_id: Option<Uuid>,
    /// Optional postal address.
    pub address: Option<String>,
    /// Optional contact phone number.
    pub phone_number: Option<String>,
    /// Optional parent contact phone number.
    pub parent_phone_number: Option<String>,
    /// Optional age in years.
    pub age: Option<i32>,
}

impl Student {
    /// Returns whether the student has a linked login account.
    #[inline]
    pub fn has_login_account(&self) -> bool {
        self.user_id.is_some()
    }

    /// Returns whether the student is enrolled in a group.
    #[inline]
    pub fn is_enrolled(&self) -> bool {
        self.group_id.is_some()
    }
}
