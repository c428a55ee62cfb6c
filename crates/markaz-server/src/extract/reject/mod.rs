//! Request extractors that reject with the crate's own error responses.
//!
//! Drop-in replacements for the stock axum extractors. Instead of axum's
//! plain-text rejections, failures surface as [`Error`] values and therefore
//! share the JSON error shape used everywhere else in the API.
//!
//! [`Error`]: crate::handler::Error

pub mod enhanced_json;
pub mod enhanced_path;
pub mod enhanced_query;
pub mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_path::Path;
pub use self::enhanced_query::Query;
pub use self::validated_json::ValidateJson;

/// Trims a library error message down to one short line for responses.
///
/// Serde errors can span several lines and echo raw input; only the first
/// line is ever useful to an API caller.
pub(crate) fn sanitize_rejection(message: &str) -> String {
    message
        .lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(160)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sanitize_rejection;

    #[test]
    fn sanitize_keeps_first_line_only() {
        let sanitized = sanitize_rejection("invalid type: map\nat line 3\ncolumn 7");
        assert_eq!(sanitized, "invalid type: map");
    }

    #[test]
    fn sanitize_caps_length() {
        let sanitized = sanitize_rejection(&"x".repeat(500));
        assert_eq!(sanitized.len(), 160);
    }
}
