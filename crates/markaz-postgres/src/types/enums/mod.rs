//! Database enumeration types backed by PostgreSQL enums.

mod user_role;

pub use user_role::UserRole;
