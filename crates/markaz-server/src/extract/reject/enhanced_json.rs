//! JSON extractor that rejects with the crate's error responses.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json as AxumJson, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::sanitize_rejection;
use crate::handler::{Error, ErrorKind};

/// JSON body extractor and response wrapper.
///
/// Behaves like [`axum::Json`] except that deserialization failures are
/// reported through [`Error`], so malformed bodies get the same response
/// shape as every other client error.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AxumJson(data) = <AxumJson<T> as FromRequest<S>>::from_request(req, state).await?;
        Ok(Self(data))
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(error) => ErrorKind::BadRequest
                .with_message("Request body does not match the expected fields")
                .with_context(sanitize_rejection(&error.to_string())),
            JsonRejection::JsonSyntaxError(error) => ErrorKind::BadRequest
                .with_message("Request body is not well-formed JSON")
                .with_context(sanitize_rejection(&error.to_string())),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Expected the 'Content-Type: application/json' header"),
            _ => ErrorKind::BadRequest.with_message("Failed to read the request body"),
        }
    }
}
