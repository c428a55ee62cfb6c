//! Known database constraint violations.

use strum::{Display, EnumString};

/// Structured representation of a known database constraint violation.
///
/// Allows callers to map low-level constraint names onto domain-level
/// conflicts (e.g. a duplicate username) without string matching at the
/// call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ConstraintViolation {
    /// Unique constraint on `users.username`.
    #[strum(serialize = "users_username_key")]
    UniqueUsername,

    /// Foreign key from `groups.instructor_id` to `users.id`.
    #[strum(serialize = "groups_instructor_id_fkey")]
    GroupInstructor,

    /// Foreign key from `students.group_id` to `groups.id`.
    #[strum(serialize = "students_group_id_fkey")]
    StudentGroup,

    /// Foreign key from `students.user_id` to `users.id`.
    #[strum(serialize = "students_user_id_fkey")]
    StudentUser,

    /// Foreign key from `attendance.student_id` to `students.id`.
    #[strum(serialize = "attendance_student_id_fkey")]
    AttendanceStudent,

    /// Foreign key from `scores.student_id` to `students.id`.
    #[strum(serialize = "scores_student_id_fkey")]
    ScoreStudent,
}

impl ConstraintViolation {
    /// Resolves a raw constraint name into a known violation, if any.
    pub fn new(constraint_name: &str) -> Option<Self> {
        constraint_name.parse().ok()
    }

    /// Returns whether this violation indicates a duplicate resource.
    #[inline]
    pub const fn is_unique_violation(self) -> bool {
        matches!(self, Self::UniqueUsername)
    }

    /// Returns whether this violation indicates a missing referenced resource.
    #[inline]
    pub const fn is_reference_violation(self) -> bool {
        !self.is_unique_violation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_constraints() {
        assert_eq!(
            ConstraintViolation::new("users_username_key"),
            Some(ConstraintViolation::UniqueUsername)
        );
        assert_eq!(
            ConstraintViolation::new("attendance_student_id_fkey"),
            Some(ConstraintViolation::AttendanceStudent)
        );
        assert_eq!(ConstraintViolation::new("unknown_constraint"), None);
    }

    #[test]
    fn classifies_violations() {
        assert!(ConstraintViolation::UniqueUsername.is_unique_violation());
        assert!(ConstraintViolation::StudentGroup.is_reference_violation());
    }
}
