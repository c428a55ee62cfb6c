//! Database query repositories for all entities in the system.
//!
//! This module contains repository traits implemented for the async
//! connection, encapsulating common query patterns behind type-safe
//! interfaces.
//!
//! # Pagination
//!
//! All queries that may return large result sets use the [`Pagination`] struct
//! to provide consistent, bounded pagination across the system.

pub mod attendance;
pub mod group;
pub mod score;
pub mod student;
pub mod user;

pub use attendance::{AttendanceFilter, AttendanceRepository};
pub use group::GroupRepository;
pub use score::ScoreRepository;
use serde::{Deserialize, Serialize};
pub use student::StudentRepository;
pub use user::UserRepository;

/// Pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            // Ensure limit is between 1 and 1000
            limit: limit.clamp(1, 1000),
            // Ensure offset is non-negative
            offset: offset.max(0),
        }
    }

    /// Creates pagination from page number and page size.
    pub fn from_page(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, 1000);
        Self::new(page_size, (page - 1) * page_size)
    }

    /// Gets the current page number (1-based).
    pub fn page_number(&self) -> i64 {
        (self.offset / self.limit) + 1
    }

    /// Gets the page size.
    pub fn page_size(&self) -> i64 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(50, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_new() {
        let pagination = Pagination::new(25, 100);
        assert_eq!(pagination.limit, 25);
        assert_eq!(pagination.offset, 100);
    }

    #[test]
    fn pagination_bounds_checking() {
        let pagination = Pagination::new(0, 10);
        assert_eq!(pagination.limit, 1);

        let pagination = Pagination::new(1500, 10);
        assert_eq!(pagination.limit, 1000);

        let pagination = Pagination::new(10, -5);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn pagination_from_page() {
        let pagination = Pagination::from_page(1, 20);
        assert_eq!(pagination.limit, 20);
        assert_eq!(pagination.offset, 0);

        let pagination = Pagination::from_page(3, 10);
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset, 20);

        let pagination = Pagination::from_page(0, 20);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn pagination_page_number() {
        let pagination = Pagination::new(20, 0);
        assert_eq!(pagination.page_number(), 1);

        let pagination = Pagination::new(10, 25);
        assert_eq!(pagination.page_number(), 3);
    }
}
