//! Shared types used across models and queries.

mod constraints;
mod enums;

pub use constraints::ConstraintViolation;
pub use enums::UserRole;
