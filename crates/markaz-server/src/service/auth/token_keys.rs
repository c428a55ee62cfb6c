//! Signing keys and claims for JWT bearer authentication.
//!
//! This module provides functionality for loading the symmetric signing secret,
//! issuing access and refresh tokens, and verifying presented tokens.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

#[cfg(any(test, feature = "config"))]
use clap::Args;
use jiff::Timestamp;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_AUTHENTICATION as TRACING_TARGET;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{Result as ServiceResult, ServiceError};

/// Minimum length of the signing secret in bytes (256 bits).
const MIN_SECRET_LENGTH: usize = 32;

/// Signing secret configuration for JWT authentication.
#[derive(Clone, Deserialize)]
#[cfg_attr(any(test, feature = "config"), derive(Args))]
pub struct TokenKeysConfig {
    /// Symmetric secret used to sign and verify JWT tokens (at least 32 bytes).
    #[cfg_attr(any(test, feature = "config"), arg(long, env = "TOKEN_SIGNING_SECRET"))]
    pub token_signing_secret: String,
}

impl TokenKeysConfig {
    /// Creates a new configuration with the provided signing secret.
    pub fn new(token_signing_secret: impl Into<String>) -> Self {
        Self {
            token_signing_secret: token_signing_secret.into(),
        }
    }

    /// Validates the configured signing secret.
    pub fn validate(&self) -> ServiceResult<()> {
        if self.token_signing_secret.len() < MIN_SECRET_LENGTH {
            return Err(ServiceError::config(format!(
                "Token signing secret must be at least {} bytes",
                MIN_SECRET_LENGTH
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for TokenKeysConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeysConfig")
            .field("token_signing_secret", &"***")
            .finish()
    }
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    /// Short-lived token presented on regular API requests.
    Access,
    /// Long-lived token accepted only by the refresh endpoint.
    Refresh,
}

/// JWT claims for authentication tokens.
///
/// This structure contains RFC 7519 standard JWT claims plus a token-use
/// discriminator. Timestamps are unix seconds so that the standard `exp`
/// validation applies.
#[derive(Debug, Clone, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub struct AuthClaims {
    // Standard (or registered) claims.
    /// Issuer (who created the token).
    #[serde(rename = "iss")]
    issued_by: Cow<'static, str>,
    /// Audience (who the token is intended for).
    #[serde(rename = "aud")]
    audience: Cow<'static, str>,

    /// Subject (username of the associated account).
    #[serde(rename = "sub")]
    pub username: String,

    /// Issued at (unix seconds).
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiration time (unix seconds).
    #[serde(rename = "exp")]
    pub expires_at: i64,

    // Private (or custom) claims.
    /// Whether this token is an access or a refresh token.
    #[serde(rename = "use")]
    pub token_use: TokenUse,
}

impl AuthClaims {
    /// Default JWT audience identifier for authentication tokens.
    const JWT_AUDIENCE: &str = "markaz:server";
    /// Default JWT issuer identifier for authentication tokens.
    const JWT_ISSUER: &str = "markaz";

    /// Lifetime of access tokens (30 minutes).
    pub const ACCESS_TOKEN_TTL_SECS: i64 = 30 * 60;
    /// Lifetime of refresh tokens (7 days).
    pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

    /// Creates a new claims structure for the given account and token use.
    pub fn new(username: impl Into<String>, token_use: TokenUse) -> Self {
        let issued_at = Timestamp::now().as_second();
        let lifetime = match token_use {
            TokenUse::Access => Self::ACCESS_TOKEN_TTL_SECS,
            TokenUse::Refresh => Self::REFRESH_TOKEN_TTL_SECS,
        };

        Self {
            issued_by: Cow::Borrowed(Self::JWT_ISSUER),
            audience: Cow::Borrowed(Self::JWT_AUDIENCE),
            username: username.into(),
            issued_at,
            expires_at: issued_at + lifetime,
            token_use,
        }
    }

    /// Checks if the token has expired based on current UTC time.
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now().as_second()
    }

    /// Returns the remaining lifetime of this token in seconds.
    ///
    /// Returns zero if the token has already expired.
    #[inline]
    #[must_use]
    pub fn remaining_seconds(&self) -> i64 {
        (self.expires_at - Timestamp::now().as_second()).max(0)
    }
}

/// Secret keys used for stateless JWT authentication.
///
/// This struct provides thread-safe access to the symmetric key used for
/// signing and verifying bearer tokens. Tokens are stateless: no server-side
/// session state is kept and issued tokens cannot be revoked before expiry.
#[derive(Clone)]
pub struct TokenKeys {
    inner: Arc<TokenKeysInner>,
}

/// Internal container for the actual key data.
struct TokenKeysInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenKeys {
    /// Creates a new `TokenKeys` instance from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns a service error if the signing secret is too short.
    pub fn from_config(config: &TokenKeysConfig) -> ServiceResult<Self> {
        config.validate()?;

        let secret = config.token_signing_secret.as_bytes();
        let inner = Arc::new(TokenKeysInner {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        });

        tracing::debug!(
            target: TRACING_TARGET,
            secret_length = secret.len(),
            "Token signing keys initialized",
        );

        Ok(Self { inner })
    }

    /// Issues a new access token for the given account.
    pub fn issue_access_token(&self, username: &str) -> Result<String> {
        self.issue(AuthClaims::new(username, TokenUse::Access))
    }

    /// Issues a new refresh token for the given account.
    pub fn issue_refresh_token(&self, username: &str) -> Result<String> {
        self.issue(AuthClaims::new(username, TokenUse::Refresh))
    }

    /// Encodes the claims into a signed JWT token.
    fn issue(&self, claims: AuthClaims) -> Result<String> {
        let header = Header::new(Algorithm::HS256);

        encode(&header, &claims, &self.inner.encoding_key).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                username = %claims.username,
                "Failed to encode JWT token"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication token generation failed")
                .with_context("Unable to create session token")
                .with_resource("authentication")
                .into_static()
        })
    }

    /// Parses and validates a JWT token string.
    ///
    /// This method performs comprehensive validation including:
    /// - Signature verification using HS256
    /// - Standard JWT claims validation (iss, aud, exp)
    /// - Token-use discrimination (access vs refresh)
    ///
    /// # Errors
    ///
    /// Returns various authentication errors for invalid tokens, including
    /// tokens of the wrong use (e.g. an access token presented for refresh).
    pub fn verify(&self, auth_token: &str, expected_use: TokenUse) -> Result<AuthClaims> {
        // Configure comprehensive JWT validation
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false; // Not Before claim not used
        validation.validate_aud = true;
        validation.set_audience(&[AuthClaims::JWT_AUDIENCE]);
        validation.set_issuer(&[AuthClaims::JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "aud", "sub", "iat", "exp"]);

        tracing::debug!(
            target: TRACING_TARGET,
            audience = AuthClaims::JWT_AUDIENCE,
            issuer = AuthClaims::JWT_ISSUER,
            "Validating JWT token with strict security settings"
        );

        let token_data = decode::<AuthClaims>(auth_token, &self.inner.decoding_key, &validation)?;
        let claims = token_data.claims;

        if claims.token_use != expected_use {
            tracing::warn!(
                target: TRACING_TARGET,
                username = %claims.username,
                token_use = ?claims.token_use,
                expected_use = ?expected_use,
                "JWT token validation failed: wrong token use"
            );

            return Err(ErrorKind::InvalidToken
                .with_message("Token cannot be used for this operation")
                .with_resource("authentication")
                .into_static());
        }

        // Double-check expiration for security
        if claims.is_expired() {
            tracing::warn!(
                target: TRACING_TARGET,
                username = %claims.username,
                expires_at = claims.expires_at,
                "JWT token validation failed: token expired"
            );

            return Err(ErrorKind::InvalidToken
                .with_message("Authentication session has expired")
                .with_context("Please sign in again to continue")
                .with_resource("authentication")
                .into_static());
        }

        tracing::debug!(
            target: TRACING_TARGET,
            username = %claims.username,
            token_use = ?claims.token_use,
            remaining_seconds = claims.remaining_seconds(),
            "JWT token validation completed successfully"
        );

        Ok(claims)
    }
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys").finish_non_exhaustive()
    }
}

impl From<JwtError> for Error<'static> {
    fn from(error: JwtError) -> Self {
        let error_response = match error.kind() {
            JwtErrorKind::ExpiredSignature => ErrorKind::InvalidToken
                .with_message("Authentication session has expired")
                .with_context("Please sign in again to continue"),
            JwtErrorKind::InvalidToken => ErrorKind::InvalidToken
                .with_message("Authentication token is invalid")
                .with_context("Token format or structure is incorrect"),
            JwtErrorKind::InvalidSignature => ErrorKind::InvalidToken
                .with_message("Authentication token signature is invalid")
                .with_context("Token may have been tampered with"),
            JwtErrorKind::InvalidAlgorithm => ErrorKind::InvalidToken
                .with_message("Authentication token uses unsupported algorithm")
                .with_context("Token was signed with an unexpected algorithm"),
            JwtErrorKind::InvalidAudience => ErrorKind::InvalidToken
                .with_message("Authentication token audience is invalid")
                .with_context("Token was not issued for this service"),
            JwtErrorKind::InvalidIssuer => ErrorKind::InvalidToken
                .with_message("Authentication token issuer is invalid")
                .with_context("Token was not issued by a trusted source"),
            JwtErrorKind::MissingRequiredClaim(claim) => ErrorKind::InvalidToken
                .with_message("Authentication token is missing required information")
                .with_context(format!("Required claim '{}' is missing", claim))
                .into_static(),
            JwtErrorKind::Base64(_) | JwtErrorKind::Json(_) => ErrorKind::MalformedAuthToken
                .with_message("Authentication token is malformed")
                .with_context("Token encoding is invalid"),
            JwtErrorKind::InvalidKeyFormat => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "JWT verification key has invalid format"
                );

                ErrorKind::InternalServerError
                    .with_message("Authentication system temporarily unavailable")
                    .with_context("Token verification configuration error")
            }
            _ => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Unexpected JWT validation error"
                );

                ErrorKind::InvalidToken
                    .with_message("Authentication token validation failed")
                    .with_context("Token could not be verified")
            }
        };

        error_response.with_resource("authentication").into_static()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keys() -> TokenKeys {
        let config = TokenKeysConfig::new("test-signing-secret-0123456789abcdef");
        TokenKeys::from_config(&config).expect("test secret is long enough")
    }

    #[test]
    fn rejects_short_secret() {
        let config = TokenKeysConfig::new("too-short");
        assert!(TokenKeys::from_config(&config).is_err());
    }

    #[test]
    fn issue_and_verify_access_token() -> anyhow::Result<()> {
        let keys = test_keys();

        let token = keys.issue_access_token("alice")?;
        let claims = keys.verify(&token, TokenUse::Access)?;

        assert_eq!(claims.username, "alice");
        assert_eq!(claims.token_use, TokenUse::Access);
        assert!(!claims.is_expired());
        assert!(claims.remaining_seconds() <= AuthClaims::ACCESS_TOKEN_TTL_SECS);

        Ok(())
    }

    #[test]
    fn issue_and_verify_refresh_token() -> anyhow::Result<()> {
        let keys = test_keys();

        let token = keys.issue_refresh_token("bob")?;
        let claims = keys.verify(&token, TokenUse::Refresh)?;

        assert_eq!(claims.username, "bob");
        assert_eq!(claims.token_use, TokenUse::Refresh);

        Ok(())
    }

    #[test]
    fn access_token_rejected_for_refresh() -> anyhow::Result<()> {
        let keys = test_keys();

        let token = keys.issue_access_token("alice")?;
        let error = keys
            .verify(&token, TokenUse::Refresh)
            .expect_err("access token must not pass as refresh token");

        assert_eq!(error.kind(), ErrorKind::InvalidToken);
        Ok(())
    }

    #[test]
    fn refresh_token_rejected_for_access() -> anyhow::Result<()> {
        let keys = test_keys();

        let token = keys.issue_refresh_token("alice")?;
        let error = keys
            .verify(&token, TokenUse::Access)
            .expect_err("refresh token must not pass as access token");

        assert_eq!(error.kind(), ErrorKind::InvalidToken);
        Ok(())
    }

    #[test]
    fn rejects_token_signed_with_different_secret() -> anyhow::Result<()> {
        let keys = test_keys();
        let other_keys = TokenKeys::from_config(&TokenKeysConfig::new(
            "another-signing-secret-0123456789abcdef",
        ))?;

        let token = other_keys.issue_access_token("alice")?;
        let error = keys
            .verify(&token, TokenUse::Access)
            .expect_err("token from another secret must be rejected");

        assert_eq!(error.kind(), ErrorKind::InvalidToken);
        Ok(())
    }

    #[test]
    fn rejects_garbage_token() {
        let keys = test_keys();
        assert!(keys.verify("not.a.jwt", TokenUse::Access).is_err());
        assert!(keys.verify("", TokenUse::Access).is_err());
    }

    #[test]
    fn expired_token_is_rejected() -> anyhow::Result<()> {
        let keys = test_keys();

        let mut claims = AuthClaims::new("alice", TokenUse::Access);
        claims.issued_at -= 2 * AuthClaims::ACCESS_TOKEN_TTL_SECS;
        claims.expires_at -= 2 * AuthClaims::ACCESS_TOKEN_TTL_SECS;

        let token = keys.issue(claims)?;
        let error = keys
            .verify(&token, TokenUse::Access)
            .expect_err("expired token must be rejected");

        assert_eq!(error.kind(), ErrorKind::InvalidToken);
        Ok(())
    }

    #[test]
    fn config_debug_redacts_secret() {
        let config = TokenKeysConfig::new("super-secret-value-0123456789abcdef");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-value"));
    }
}
