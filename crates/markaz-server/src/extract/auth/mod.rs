//! Authentication and authorization extractors.

mod bearer_token;
mod current_user;
mod permission;

pub use bearer_token::AuthToken;
pub use current_user::CurrentUser;
pub use permission::{AccessPolicy, AuthResult, Permission, student_scoped_access};
