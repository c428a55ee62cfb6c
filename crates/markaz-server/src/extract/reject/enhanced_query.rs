//! Query string extractor that rejects with the crate's error responses.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::sanitize_rejection;
use crate::handler::{Error, ErrorKind};

/// Query string extractor.
///
/// The query types in this API are small structs of optional filters, so the
/// only realistic failure is a value of the wrong shape (a non-UUID id, a
/// non-numeric limit). Those come back as `400 Bad Request` with the serde
/// message attached as context.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AxumQuery(query) =
            <AxumQuery<T> as FromRequestParts<S>>::from_request_parts(parts, state).await?;
        Ok(Self(query))
    }
}

impl From<QueryRejection> for Error<'static> {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(
            target: "markaz_server::extract::query",
            error = %rejection,
            "query string rejected"
        );

        ErrorKind::BadRequest
            .with_message("Invalid query parameters")
            .with_context(sanitize_rejection(&rejection.to_string()))
    }
}
