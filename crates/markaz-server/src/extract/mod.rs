//! [`Router`] extractors and their rejections.
//!
//! [`Router`]: axum::Router

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AccessPolicy, AuthResult, AuthToken, CurrentUser, Permission};
pub use crate::extract::reject::{Json, Path, Query, ValidateJson};
