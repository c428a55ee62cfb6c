//! Database error to HTTP error conversion handlers.
//!
//! This module converts [`PgError`]s and known PostgreSQL constraint
//! violations into appropriate HTTP error responses.
//!
//! All conversions are implemented via the `From` trait for ergonomic usage.

use markaz_postgres::PgError;
use markaz_postgres::types::ConstraintViolation;

use crate::handler::{Error, ErrorKind};

/// Tracing target for database error conversions.
const TRACING_TARGET: &str = "markaz_server::postgres_errors";

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::UniqueUsername => ErrorKind::Conflict
                .with_message("An account with this username already exists")
                .with_resource("user"),
            ConstraintViolation::GroupInstructor => ErrorKind::BadRequest
                .with_message("The referenced instructor does not exist")
                .with_resource("group"),
            ConstraintViolation::StudentGroup => ErrorKind::BadRequest
                .with_message("The referenced group does not exist")
                .with_resource("student"),
            ConstraintViolation::StudentUser => ErrorKind::BadRequest
                .with_message("The referenced user account does not exist")
                .with_resource("student"),
            ConstraintViolation::AttendanceStudent => ErrorKind::BadRequest
                .with_message("The referenced student does not exist")
                .with_resource("attendance"),
            ConstraintViolation::ScoreStudent => ErrorKind::BadRequest
                .with_message("The referenced student does not exist")
                .with_resource("score"),
        }
        .into_static()
    }
}

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        match error {
            PgError::Config(config_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %config_error,
                    "database configuration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Timeout(timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    "database timeout",
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Connection(connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Migration(migration_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %migration_error,
                    "database migration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Query(ref query_error) => {
                // Try to extract constraint violation
                if let Some(constraint_name) = error.constraint()
                    && let Some(constraint) = ConstraintViolation::new(constraint_name)
                {
                    tracing::error!(
                        target: TRACING_TARGET,
                        constraint = constraint_name,
                        error = %query_error,
                        "query error (constraint violation)"
                    );
                    return constraint.into();
                }

                if error.is_not_found() {
                    return ErrorKind::NotFound.into_error();
                }

                // Generic query error without constraint
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %query_error,
                    "query error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Unexpected(unexpected_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %unexpected_error,
                    "unexpected database error"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

// Used only for transactions.
impl From<markaz_postgres::error::DieselError> for Error<'static> {
    fn from(error: markaz_postgres::error::DieselError) -> Self {
        // Convert DieselError -> PgError -> Error
        let pg_error: PgError = error.into();
        pg_error.into()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn unique_username_maps_to_conflict() {
        let error: Error<'static> = ConstraintViolation::UniqueUsername.into();
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.kind().status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn reference_violations_map_to_bad_request() {
        for constraint in [
            ConstraintViolation::GroupInstructor,
            ConstraintViolation::StudentGroup,
            ConstraintViolation::StudentUser,
            ConstraintViolation::AttendanceStudent,
            ConstraintViolation::ScoreStudent,
        ] {
            let error: Error<'static> = constraint.into();
            assert_eq!(error.kind(), ErrorKind::BadRequest);
        }
    }

    #[test]
    fn not_found_query_maps_to_not_found() {
        let error: Error<'static> =
            PgError::Query(markaz_postgres::error::DieselError::NotFound).into();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }
}
