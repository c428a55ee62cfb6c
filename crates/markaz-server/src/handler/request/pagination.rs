use markaz_postgres::query::Pagination as QueryPagination;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pagination query parameters.
///
/// Both fields are optional; sensible defaults keep unpaginated requests
/// cheap while the upper bounds prevent expensive deep scans.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct Pagination {
    /// The number of records to skip before starting to return results.
    #[validate(range(min = 0, max = 100_000))]
    pub offset: Option<u32>,

    /// The maximum number of records to return in a single request.
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u32>,
}

impl Pagination {
    /// Default pagination limit.
    const DEFAULT_LIMIT: u32 = 50;
    /// Default pagination offset.
    const DEFAULT_OFFSET: u32 = 0;

    /// Returns a new [`Pagination`].
    #[inline]
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    /// Returns the pagination offset.
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(Self::DEFAULT_OFFSET)
    }

    /// Returns the pagination limit.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

impl From<Pagination> for QueryPagination {
    fn from(pagination: Pagination) -> Self {
        Self::new(
            i64::from(pagination.limit()),
            i64::from(pagination.offset()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let pagination = Pagination::default();
        assert_eq!(pagination.offset(), 0);
        assert_eq!(pagination.limit(), 50);
    }

    #[test]
    fn converts_to_query_pagination() {
        let query: QueryPagination = Pagination::new(20, 10).into();
        assert_eq!(query.offset, 20);
        assert_eq!(query.limit, 10);
    }
}
