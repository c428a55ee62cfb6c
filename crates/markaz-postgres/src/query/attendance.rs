//! Attendance repository for daily presence tracking.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{AttendanceRecord, NewAttendanceRecord};
use crate::{PgConnection, PgError, PgResult, schema};

/// Optional filters for attendance listings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceFilter {
    /// Restrict to a single student.
    pub student_id: Option<Uuid>,
    /// Restrict to students of a single group.
    pub group_id: Option<Uuid>,
}

/// Repository for attendance database operations.
pub trait AttendanceRepository {
    /// Records an attendance entry for a student.
    fn record_attendance(
        &mut self,
        new_record: NewAttendanceRecord,
    ) -> impl Future<Output = PgResult<AttendanceRecord>> + Send;

    /// Lists attendance records matching the given filter.
    ///
    /// Records are ordered by entry date with most recent first.
    fn list_attendance(
        &mut self,
        filter: AttendanceFilter,
    ) -> impl Future<Output = PgResult<Vec<AttendanceRecord>>> + Send;
}

impl AttendanceRepository for PgConnection {
    async fn record_attendance(
        &mut self,
        new_record: NewAttendanceRecord,
    ) -> PgResult<AttendanceRecord> {
        use schema::attendance;

        diesel::insert_into(attendance::table)
            .values(&new_record)
            .returning(AttendanceRecord::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_attendance(
        &mut self,
        filter: AttendanceFilter,
    ) -> PgResult<Vec<AttendanceRecord>> {
        use schema::{attendance, students};

        let mut query = attendance::table.into_boxed();

        if let Some(student_id) = filter.student_id {
            query = query.filter(attendance::dsl::student_id.eq(student_id));
        }

        if let Some(group_id) = filter.group_id {
            let group_students = students::table
                .filter(students::dsl::group_id.eq(group_id))
                .select(students::dsl::id);
            query = query.filter(attendance::dsl::student_id.eq_any(group_students));
        }

        query
            .order(attendance::dsl::entry_date.desc())
            .select(AttendanceRecord::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
