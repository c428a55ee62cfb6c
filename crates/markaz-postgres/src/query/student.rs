//! Student repository for managing enrolled students.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewStudent, Student};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for student database operations.
pub trait StudentRepository {
    /// Enrolls a new student.
    fn create_student(
        &mut self,
        new_student: NewStudent,
    ) -> impl Future<Output = PgResult<Student>> + Send;

    /// Finds a student by its unique identifier.
    fn find_student_by_id(
        &mut self,
        student_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Student>>> + Send;

    /// Lists all students with pagination support.
    ///
    /// Students are ordered by creation time with most recent first.
    fn list_students(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Student>>> + Send;

    /// Finds all students enrolled in the given group.
    fn find_students_by_group(
        &mut self,
        group_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<Student>>> + Send;

    /// Finds all students enrolled in any group taught by the given instructor.
    fn find_students_by_instructor(
        &mut self,
        instructor_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<Student>>> + Send;

    /// Lists students ordered by reward coins, highest first.
    fn list_top_students(&mut self, limit: i64)
    -> impl Future<Output = PgResult<Vec<Student>>> + Send;

    /// Adds reward coins to a student's balance and returns the updated row.
    fn add_coins(
        &mut self,
        student_id: Uuid,
        amount: i32,
    ) -> impl Future<Output = PgResult<Student>> + Send;
}

impl StudentRepository for PgConnection {
    async fn create_student(&mut self, mut new_student: NewStudent) -> PgResult<Student> {
        use schema::students;

        // Normalize fields: trim whitespace
        new_student.full_name = new_student.full_name.trim().to_owned();

        diesel::insert_into(students::table)
            .values(&new_student)
            .returning(Student::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_student_by_id(&mut self, student_id: Uuid) -> PgResult<Option<Student>> {
        use schema::students::{self, dsl};

        students::table
            .filter(dsl::id.eq(student_id))
            .select(Student::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_students(&mut self, pagination: Pagination) -> PgResult<Vec<Student>> {
        use schema::students::{self, dsl};

        students::table
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Student::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_students_by_group(&mut self, group_id: Uuid) -> PgResult<Vec<Student>> {
        use schema::students::{self, dsl};

        students::table
            .filter(dsl::group_id.eq(group_id))
            .order(dsl::full_name.asc())
            .select(Student::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_students_by_instructor(&mut self, instructor_id: Uuid) -> PgResult<Vec<Student>> {
        use schema::{groups, students};

        students::table
            .inner_join(groups::table)
            .filter(groups::dsl::instructor_id.eq(instructor_id))
            .order(students::dsl::full_name.asc())
            .select(Student::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_top_students(&mut self, limit: i64) -> PgResult<Vec<Student>> {
        use schema::students::{self, dsl};

        students::table
            .order(dsl::coins.desc())
            .limit(limit.clamp(1, 100))
            .select(Student::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn add_coins(&mut self, student_id: Uuid, amount: i32) -> PgResult<Student> {
        use schema::students::{self, dsl};

        diesel::update(students::table.filter(dsl::id.eq(student_id)))
            .set(dsl::coins.eq(dsl::coins + amount))
            .returning(Student::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }
}
