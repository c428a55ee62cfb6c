//! Study group model.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::groups;

/// A study group taught by a single instructor.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Group {
    /// Unique group identifier.
    pub id: Uuid,
    /// Human-readable group name.
    pub display_name: String,
    /// Instructor account responsible for this group.
    pub instructor_id: Uuid,
    /// Free-form schedule description (e.g. "Mon/Wed/Fri 16:00").
    pub schedule: String,
    /// Optional monthly price.
    pub price: Option<i32>,
    /// Timestamp when the group was created.
    pub created_at: Timestamp,
}

/// Data for creating a new group.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewGroup {
    /// Human-readable group name.
    pub display_name: String,
    /// Instructor account responsible for this group.
    pub instructor_id: Uuid,
    /// Free-form schedule description.
    pub schedule: String,
    /// Optional monthly price.
    pub price: Option<i32>,
}

impl Group {
    /// Returns whether the given account teaches this group.
    #[inline]
    pub fn is_taught_by(&self, user_id: Uuid) -> bool {
        self.instructor_id == user_id
    }
}
