//! Score record model.

use diesel::prelude::*;
use jiff_diesel::{Date, Timestamp};
use uuid::Uuid;

use crate::schema::scores;

/// A score awarded to a student on a given day.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = scores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Score {
    /// Unique record identifier.
    pub id: Uuid,
    /// Student this score belongs to.
    pub student_id: Uuid,
    /// Civil date the score applies to.
    pub entry_date: Date,
    /// Points awarded.
    pub points: i32,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Timestamp when the record was created.
    pub created_at: Timestamp,
}

/// Data for recording a new score.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = scores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewScore {
    /// Student this score belongs to.
    pub student_id: Uuid,
    /// Civil date the score applies to.
    pub entry_date: Date,
    /// Points awarded.
    pub points: i32,
    /// Optional free-form description.
    pub description: Option<String>,
}
