//! Response types for HTTP handlers.

mod error_response;
mod user_profile;

pub use error_response::ErrorResponse;
pub use user_profile::UserProfile;
