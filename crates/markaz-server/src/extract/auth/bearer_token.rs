use axum::RequestPartsExt;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;
use derive_more::Deref;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{AuthClaims, TokenKeys, TokenUse};

/// `Authorization: Bearer <token>` header.
type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;

/// Verified access-token claims extracted from the `Authorization` header.
///
/// Verifies the token's signature, expiry, issuer, audience and token use.
/// Does not touch the database; see [`CurrentUser`] for the account-backed
/// variant.
///
/// [`CurrentUser`]: crate::extract::CurrentUser
#[must_use = "claims do nothing unless you use them"]
#[derive(Debug, Clone, Deref)]
pub struct AuthToken(pub AuthClaims);

impl AuthToken {
    /// Returns the username the token was issued for.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl<S> FromRequestParts<S> for AuthToken
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        // Return the cached claims if the token was already verified.
        if let Some(auth_token) = parts.extensions.get::<Self>() {
            return Ok(auth_token.clone());
        }

        let TypedHeader(authorization) =
            parts.extract::<AuthBearerHeader>().await.map_err(|error| {
                match error.reason() {
                    TypedHeaderRejectionReason::Missing => ErrorKind::MissingAuthToken
                        .with_message("The authorization header is required but was not provided")
                        .with_context("Include 'Authorization: Bearer <token>' header"),
                    TypedHeaderRejectionReason::Error(_) => ErrorKind::MalformedAuthToken
                        .with_message("The authorization header format is invalid")
                        .with_context("Use format 'Authorization: Bearer <token>'"),
                    _ => ErrorKind::InternalServerError
                        .with_message("Failed to process the authorization header"),
                }
                .with_resource("authentication")
                .into_static()
            })?;

        let token_keys = TokenKeys::from_ref(state);
        let claims = token_keys.verify(authorization.token(), TokenUse::Access)?;

        tracing::trace!(
            target: TRACING_TARGET_AUTHENTICATION,
            username = claims.username,
            "access token verified"
        );

        let auth_token = Self(claims);
        parts.extensions.insert(auth_token.clone());
        Ok(auth_token)
    }
}
