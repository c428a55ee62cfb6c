//! User role enumeration for access control across the center.

use std::cmp;

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the role and permission level of a user account.
///
/// This enumeration corresponds to the `USER_ROLE` PostgreSQL enum and provides
/// hierarchical access control for the center with clearly defined capabilities.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::UserRole"]
pub enum UserRole {
    /// Full control over the center, including all management operations
    #[db_rename = "owner"]
    #[serde(rename = "owner")]
    Owner,

    /// Administrative access with group and student management capabilities
    #[db_rename = "administrator"]
    #[serde(rename = "administrator")]
    Administrator,

    /// Can record attendance and scores for students of own groups
    #[db_rename = "instructor"]
    #[serde(rename = "instructor")]
    Instructor,

    /// Student-facing account with read-only access
    #[db_rename = "learner"]
    #[serde(rename = "learner")]
    #[default]
    Learner,
}

impl UserRole {
    /// Returns whether this role carries center-wide management privileges.
    #[inline]
    pub const fn is_management(self) -> bool {
        matches!(self, UserRole::Owner | UserRole::Administrator)
    }

    /// Returns whether this role teaches groups.
    #[inline]
    pub const fn is_instructor(self) -> bool {
        matches!(self, UserRole::Instructor)
    }

    /// Returns the hierarchical level of this role (higher number = more permissions).
    #[inline]
    pub const fn hierarchy_level(self) -> u8 {
        match self {
            UserRole::Learner => 1,
            UserRole::Instructor => 2,
            UserRole::Administrator => 3,
            UserRole::Owner => 4,
        }
    }

    /// Returns whether this role has equal or higher permissions than the other role.
    #[inline]
    pub const fn has_permission_level_of(self, other: UserRole) -> bool {
        self.hierarchy_level() >= other.hierarchy_level()
    }
}

impl PartialOrd for UserRole {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserRole {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.hierarchy_level().cmp(&other.hierarchy_level())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn role_hierarchy_ordering() {
        assert!(UserRole::Owner > UserRole::Administrator);
        assert!(UserRole::Administrator > UserRole::Instructor);
        assert!(UserRole::Instructor > UserRole::Learner);
    }

    #[test]
    fn management_roles() {
        assert!(UserRole::Owner.is_management());
        assert!(UserRole::Administrator.is_management());
        assert!(!UserRole::Instructor.is_management());
        assert!(!UserRole::Learner.is_management());
    }

    #[test]
    fn serde_renames_match_database() -> anyhow::Result<()> {
        let json = serde_json::to_string(&UserRole::Administrator)?;
        assert_eq!(json, "\"administrator\"");

        let role: UserRole = serde_json::from_str("\"learner\"")?;
        assert_eq!(role, UserRole::Learner);
        Ok(())
    }

    #[test]
    fn from_str_parses_variant_names() -> anyhow::Result<()> {
        assert_eq!(UserRole::from_str("Owner")?, UserRole::Owner);
        assert!(UserRole::from_str("superuser").is_err());
        Ok(())
    }
}
