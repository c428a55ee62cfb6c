//! Path parameter extractor that rejects with the crate's error responses.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::sanitize_rejection;
use crate::handler::{Error, ErrorKind};

/// Path parameter extractor.
///
/// Every dynamic segment in this API is a UUID, so a deserialization failure
/// almost always means a malformed identifier. The rejection points the
/// caller at the expected format instead of axum's generic message.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AxumPath(params) =
            <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await?;
        Ok(Self(params))
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(error) => ErrorKind::BadRequest
                .with_message("Invalid path parameter, expected a UUID")
                .with_context(sanitize_rejection(&error.to_string())),
            PathRejection::MissingPathParams(error) => {
                ErrorKind::MissingPathParam.with_context(sanitize_rejection(&error.to_string()))
            }
            _ => ErrorKind::InternalServerError.with_message("Path parameter processing failed"),
        }
    }
}
