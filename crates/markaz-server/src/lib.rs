#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for authentication operations.
pub const TRACING_TARGET_AUTHENTICATION: &str = "markaz_server::authentication";

/// Tracing target for authorization decisions.
pub const TRACING_TARGET_AUTHORIZATION: &str = "markaz_server::authorization";

pub mod extract;
pub mod handler;
pub mod service;
