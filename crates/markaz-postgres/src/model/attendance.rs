//! Attendance record model.

use diesel::prelude::*;
use jiff_diesel::{Date, Timestamp};
use uuid::Uuid;

use crate::schema::attendance;

/// A single attendance entry for a student on a given day.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = attendance)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttendanceRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Student this record belongs to.
    pub student_id: Uuid,
    /// Civil date the record applies to.
    pub entry_date: Date,
    /// Whether the student was present.
    pub is_present: bool,
    /// Timestamp when the record was created.
    pub created_at: Timestamp,
}

/// Data for recording attendance.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attendance)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAttendanceRecord {
    /// Student this record belongs to.
    pub student_id: Uuid,
    /// Civil date the record applies to.
    pub entry_date: Date,
    /// Whether the student was present.
    pub is_present: bool,
}
