//! Core authorization types and utilities.
//!
//! This module provides the fundamental types used for authorization throughout
//! the system, including permissions, access decisions, and results.

use std::borrow::Cow;
use std::future::Future;

use markaz_postgres::PgConn;
use markaz_postgres::model::Student;
use markaz_postgres::types::UserRole;
use strum::{EnumIter, EnumString, IntoEnumIterator};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::handler::{ErrorKind, Result};

/// Authorization surface implemented by authenticated principals.
///
/// Handlers go through this trait instead of branching on roles ad hoc, so
/// the whole role policy lives in one place.
pub trait AccessPolicy {
    /// Requires the given permission, returning `403 Forbidden` otherwise.
    fn authorize(&self, permission: Permission) -> Result<()>;

    /// Authorizes a student-scoped operation for the given student.
    ///
    /// Resolves the student (absent students surface as `404 Not Found`) and,
    /// for instructors, the student's group, then delegates to
    /// [`student_scoped_access`]. Returns the student on success so handlers
    /// don't have to look it up twice.
    fn authorize_student_access(
        &self,
        conn: &mut PgConn,
        student_id: Uuid,
        permission: Permission,
    ) -> impl Future<Output = Result<Student>> + Send;
}

/// Granular permissions for authorization checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(EnumIter, EnumString)]
pub enum Permission {
    // Group permissions
    /// Can view study groups.
    ViewGroups,
    /// Can create new study groups.
    CreateGroups,

    // Student permissions
    /// Can view enrolled students.
    ViewStudents,
    /// Can enroll new students.
    CreateStudents,

    // Record permissions
    /// Can view attendance records.
    ViewAttendance,
    /// Can record attendance for students.
    RecordAttendance,
    /// Can view score records.
    ViewScores,
    /// Can record scores for students.
    RecordScores,
}

impl Permission {
    /// Checks if the given role satisfies this permission requirement.
    ///
    /// Student-scoped permissions are further restricted for instructors to
    /// students of their own groups; see [`student_scoped_access`].
    pub const fn is_permitted_by_role(self, role: UserRole) -> bool {
        use UserRole::{Administrator, Instructor, Learner, Owner};

        match self {
            // Read permissions are open to every authenticated account
            Self::ViewGroups | Self::ViewStudents | Self::ViewAttendance | Self::ViewScores => {
                matches!(role, Learner | Instructor | Administrator | Owner)
            }

            // Record permissions require teaching or management roles
            Self::RecordAttendance | Self::RecordScores => {
                matches!(role, Instructor | Administrator | Owner)
            }

            // Management permissions
            Self::CreateGroups | Self::CreateStudents => matches!(role, Administrator | Owner),
        }
    }

    /// Returns the minimum role required for this permission.
    #[must_use]
    pub const fn minimum_required_role(self) -> UserRole {
        match self {
            Self::ViewGroups | Self::ViewStudents | Self::ViewAttendance | Self::ViewScores => {
                UserRole::Learner
            }
            Self::RecordAttendance | Self::RecordScores => UserRole::Instructor,
            Self::CreateGroups | Self::CreateStudents => UserRole::Administrator,
        }
    }

    /// Returns true if this is a read-only permission that doesn't modify anything.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(
            self,
            Self::ViewGroups | Self::ViewStudents | Self::ViewAttendance | Self::ViewScores
        )
    }

    /// Returns true if this permission is restricted to an instructor's own
    /// groups when held by an instructor.
    #[must_use]
    pub const fn is_group_scoped(self) -> bool {
        matches!(
            self,
            Self::ViewStudents | Self::RecordAttendance | Self::RecordScores
        )
    }

    /// Returns all permissions available to the given role.
    pub fn permissions_for_role(role: UserRole) -> Vec<Self> {
        Self::iter()
            .filter(|perm| perm.is_permitted_by_role(role))
            .collect()
    }
}

/// Result of an authorization check with detailed information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub granted: bool,
    pub reason: Option<Cow<'static, str>>,
}

impl AuthResult {
    /// Creates a granted authorization result.
    pub const fn granted() -> Self {
        Self {
            granted: true,
            reason: None,
        }
    }

    /// Creates a denied authorization result with a reason.
    pub fn denied(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            granted: false,
            reason: Some(reason.into()),
        }
    }

    /// Converts the result to a `Result` type, returning an error if access is denied.
    pub fn into_result(self) -> Result<()> {
        if self.granted {
            Ok(())
        } else {
            let error = match self.reason {
                Some(reason) => ErrorKind::Forbidden.with_context(reason).into_static(),
                None => ErrorKind::Forbidden.into_error(),
            };
            Err(error)
        }
    }
}

/// Decides whether a principal may act on a single student's record.
///
/// Management roles are granted unconditionally. Instructors are granted only
/// when they teach the group the student is enrolled in, which is why the
/// caller must resolve `group_instructor_id` through the student's group.
/// Learners keep read access but can never record.
pub fn student_scoped_access(
    permission: Permission,
    role: UserRole,
    principal_id: Uuid,
    group_instructor_id: Option<Uuid>,
) -> AuthResult {
    if role.is_management() {
        return AuthResult::granted();
    }

    if role.is_instructor() {
        return match group_instructor_id {
            Some(instructor_id) if instructor_id == principal_id => AuthResult::granted(),
            Some(_) => {
                tracing::debug!(
                    target: TRACING_TARGET_AUTHORIZATION,
                    principal_id = %principal_id,
                    permission = ?permission,
                    "instructor denied: student belongs to another instructor's group"
                );
                AuthResult::denied("Student is not enrolled in one of your groups")
            }
            None => AuthResult::denied("Student is not enrolled in any of your groups"),
        };
    }

    if permission.is_read_only() {
        return AuthResult::granted();
    }

    AuthResult::denied("Role does not permit recording student data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn management_can_create_groups_and_students() {
        for permission in [Permission::CreateGroups, Permission::CreateStudents] {
            assert!(permission.is_permitted_by_role(UserRole::Owner));
            assert!(permission.is_permitted_by_role(UserRole::Administrator));
            assert!(!permission.is_permitted_by_role(UserRole::Instructor));
            assert!(!permission.is_permitted_by_role(UserRole::Learner));
        }
    }

    #[test]
    fn everyone_can_read() {
        for permission in [
            Permission::ViewGroups,
            Permission::ViewStudents,
            Permission::ViewAttendance,
            Permission::ViewScores,
        ] {
            assert!(permission.is_permitted_by_role(UserRole::Learner));
            assert!(permission.is_permitted_by_role(UserRole::Owner));
        }
    }

    #[test]
    fn learners_cannot_record() {
        assert!(!Permission::RecordAttendance.is_permitted_by_role(UserRole::Learner));
        assert!(!Permission::RecordScores.is_permitted_by_role(UserRole::Learner));
    }

    #[test]
    fn student_permissions_are_group_scoped() {
        assert!(Permission::ViewStudents.is_group_scoped());
        assert!(Permission::RecordAttendance.is_group_scoped());
        assert!(Permission::RecordScores.is_group_scoped());
        assert!(!Permission::ViewGroups.is_group_scoped());
    }

    #[test]
    fn permissions_for_role_respects_hierarchy() {
        let learner = Permission::permissions_for_role(UserRole::Learner);
        let instructor = Permission::permissions_for_role(UserRole::Instructor);
        let owner = Permission::permissions_for_role(UserRole::Owner);

        assert!(learner.len() < instructor.len());
        assert!(instructor.len() < owner.len());
        assert_eq!(owner.len(), 8);
    }

    #[test]
    fn management_reaches_any_student() {
        let principal = Uuid::new_v4();

        for role in [UserRole::Owner, UserRole::Administrator] {
            for permission in [Permission::ViewStudents, Permission::RecordScores] {
                assert!(student_scoped_access(permission, role, principal, None).granted);
                let other = Some(Uuid::new_v4());
                assert!(student_scoped_access(permission, role, principal, other).granted);
            }
        }
    }

    #[test]
    fn instructor_records_own_students_only() {
        let principal = Uuid::new_v4();
        let permission = Permission::RecordAttendance;

        let own =
            student_scoped_access(permission, UserRole::Instructor, principal, Some(principal));
        assert!(own.granted);

        let other = student_scoped_access(
            permission,
            UserRole::Instructor,
            principal,
            Some(Uuid::new_v4()),
        );
        assert!(!other.granted);
        assert!(other.into_result().is_err());

        let unenrolled = student_scoped_access(permission, UserRole::Instructor, principal, None);
        assert!(!unenrolled.granted);
    }

    #[test]
    fn instructor_views_own_students_only() {
        let principal = Uuid::new_v4();
        let permission = Permission::ViewStudents;

        let own =
            student_scoped_access(permission, UserRole::Instructor, principal, Some(principal));
        assert!(own.granted);

        let other = student_scoped_access(
            permission,
            UserRole::Instructor,
            principal,
            Some(Uuid::new_v4()),
        );
        assert!(!other.granted);
        assert_eq!(
            other
                .into_result()
                .expect_err("must deny viewing another instructor's student")
                .kind(),
            ErrorKind::Forbidden
        );

        let unenrolled = student_scoped_access(permission, UserRole::Instructor, principal, None);
        assert!(!unenrolled.granted);
    }

    #[test]
    fn learner_reads_but_never_records() {
        let principal = Uuid::new_v4();

        let view = student_scoped_access(
            Permission::ViewStudents,
            UserRole::Learner,
            principal,
            Some(Uuid::new_v4()),
        );
        assert!(view.granted);

        let record = student_scoped_access(
            Permission::RecordScores,
            UserRole::Learner,
            principal,
            Some(principal),
        );
        assert!(!record.granted);
    }

    #[test]
    fn auth_result_conversion() {
        assert!(AuthResult::granted().into_result().is_ok());

        let denied = AuthResult::denied("Access denied").into_result();
        let error = denied.expect_err("denied result must convert to an error");
        assert_eq!(error.kind(), ErrorKind::Forbidden);
        assert_eq!(error.context(), Some("Access denied"));
    }
}
