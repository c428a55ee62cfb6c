//! Shared request types used across handlers.

mod pagination;

pub use crate::handler::request::pagination::Pagination;
