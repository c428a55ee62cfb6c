//! JSON extractor that validates the payload after deserializing it.

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// JSON body extractor that runs `validator` rules after deserialization.
///
/// Field-level failures are collapsed into a single `400 Bad Request` whose
/// message names each offending field, so callers can fix a payload in one
/// round trip.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        data.validate()?;
        Ok(Self(data))
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| match &error.message {
                    Some(message) => format!("Field '{field}': {message}"),
                    None => format!("Field '{field}' failed the '{}' rule", error.code),
                })
            })
            .collect();

        tracing::warn!(
            target: "markaz_server::extract::validate",
            errors = ?details,
            "request validation failed"
        );

        let message = match details.as_slice() {
            [] => "Validation failed".to_string(),
            parts => parts.join(". "),
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 3, max = 32))]
        username: String,
        #[validate(range(min = 1, max = 120))]
        age: i32,
    }

    #[test]
    fn validation_errors_map_to_bad_request() {
        let payload = Payload {
            username: "ab".to_string(),
            age: 0,
        };

        let errors = payload.validate().expect_err("payload must fail validation");
        let error = Error::from(errors);

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.resource(), Some("request"));

        let message = error.message().expect("message must name the fields");
        assert!(message.contains("username"));
        assert!(message.contains("age"));
    }
}
