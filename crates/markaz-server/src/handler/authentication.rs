//! Authentication handlers: login, token refresh and profile lookup.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use markaz_postgres::PgClient;
use markaz_postgres::query::UserRepository;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::extract::{CurrentUser, Json, ValidateJson};
use crate::handler::response::UserProfile;
use crate::handler::{ErrorKind, Result};
use crate::service::{AuthHasher, ServiceState, TokenKeys, TokenUse};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "markaz_server::handler::authentication";

/// Request payload for login.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    /// Username of the account.
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    /// Password of the account.
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Response returned after successful login.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    /// Short-lived bearer token for API requests.
    pub access_token: String,
    /// Long-lived token accepted only by the refresh endpoint.
    pub refresh_token: String,
    /// Profile of the authenticated account.
    pub profile: UserProfile,
}

/// Verifies credentials and issues an access/refresh token pair.
#[tracing::instrument(skip_all)]
async fn login(
    State(pg_client): State<PgClient>,
    State(auth_hasher): State<AuthHasher>,
    State(token_keys): State<TokenKeys>,
    ValidateJson(request): ValidateJson<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>)> {
    let normalized_username = request.username.trim().to_lowercase();

    tracing::trace!(
        target: TRACING_TARGET,
        username = %normalized_username,
        "login attempt"
    );

    let mut conn = pg_client.get_connection().await?;
    let user = conn.find_user_by_username(&normalized_username).await?;

    // Always perform password hashing to keep response timing uniform
    // between unknown usernames and wrong passwords.
    let password_valid = match &user {
        Some(user) => auth_hasher
            .verify_password(&request.password, &user.password_hash)
            .is_ok(),
        None => auth_hasher.verify_dummy_password(&request.password),
    };

    let Some(user) = user.filter(|_| password_valid) else {
        tracing::warn!(
            target: TRACING_TARGET,
            username = %normalized_username,
            "login failed"
        );

        // Single generic failure path: never reveal whether the username
        // exists or the password was wrong.
        return Err(ErrorKind::InvalidCredentials.into_error());
    };

    let access_token = token_keys.issue_access_token(&user.username)?;
    let refresh_token = token_keys.issue_refresh_token(&user.username)?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = user.id.to_string(),
        username = %user.username,
        role = %user.role,
        "login successful: token pair issued"
    );

    let response = LoginResponse {
        access_token,
        refresh_token,
        profile: UserProfile::from_model(user),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Request payload for token refresh.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest {
    /// Refresh token obtained at login.
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Response returned after a successful refresh.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    /// Newly issued short-lived bearer token.
    pub access_token: String,
    /// Remaining lifetime of the presented refresh token, in seconds.
    pub refresh_expires_in: i64,
}

/// Exchanges a valid refresh token for a new access token.
///
/// The refresh token itself is not rotated; the client keeps using it until
/// it expires and then performs a full login.
#[tracing::instrument(skip_all)]
async fn refresh(
    State(pg_client): State<PgClient>,
    State(token_keys): State<TokenKeys>,
    ValidateJson(request): ValidateJson<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let claims = token_keys.verify(&request.refresh_token, TokenUse::Refresh)?;

    tracing::trace!(
        target: TRACING_TARGET,
        username = %claims.username,
        "token refresh attempt"
    );

    // Tokens are stateless, so deleted accounts are caught here.
    let mut conn = pg_client.get_connection().await?;
    let user = conn
        .find_user_by_username(&claims.username)
        .await?
        .ok_or_else(|| {
            ErrorKind::InvalidToken
                .with_context("The account for this token no longer exists")
                .with_resource("authentication")
                .into_static()
        })?;

    let access_token = token_keys.issue_access_token(&user.username)?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = user.id.to_string(),
        username = %user.username,
        "access token refreshed"
    );

    let response = RefreshResponse {
        access_token,
        refresh_expires_in: claims.remaining_seconds(),
    };

    Ok(Json(response))
}

/// Returns the profile of the authenticated account.
#[tracing::instrument(skip_all)]
async fn whoami(current_user: CurrentUser) -> Result<Json<UserProfile>> {
    tracing::trace!(
        target: TRACING_TARGET,
        username = %current_user.username,
        "profile lookup"
    );

    Ok(Json(UserProfile::from_model(current_user.0)))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/auth/login/", post(login))
        .route("/token/refresh/", post(refresh))
        .route("/auth/user/", get(whoami))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;

    use super::routes;
    use crate::handler::ErrorKind;
    use crate::handler::test::create_test_server_with_router;
    use crate::service::AuthHasher;

    #[test]
    fn login_failures_share_one_credentials_error() -> anyhow::Result<()> {
        let auth_hasher = AuthHasher::new()?;

        // Wrong password for an existing account.
        let stored_hash = auth_hasher.hash_password("correct horse battery")?;
        let wrong_password = auth_hasher
            .verify_password("not the password", &stored_hash)
            .expect_err("wrong password must be rejected");

        // Unknown account: the dummy verification burns equivalent work and
        // the handler then raises the same generic error.
        assert!(!auth_hasher.verify_dummy_password("not the password"));
        let unknown_username = ErrorKind::InvalidCredentials.into_error();

        // Both failure paths must be indistinguishable to the caller.
        assert_eq!(wrong_password.kind(), unknown_username.kind());
        assert_eq!(wrong_password.message(), unknown_username.message());
        assert_eq!(wrong_password.resource(), unknown_username.resource());
        assert_eq!(wrong_password.context(), unknown_username.context());
        assert_eq!(
            wrong_password.kind().status_code(),
            StatusCode::UNAUTHORIZED
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_rejects_invalid_payload() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let request = serde_json::json!({
            "username": "ab",
            "password": "",
        });

        let response = server.post("/auth/login/").json(&request).await;
        response.assert_status_bad_request();

        Ok(())
    }

    #[tokio::test]
    async fn refresh_rejects_garbage_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let request = serde_json::json!({
            "refreshToken": "not-a-jwt",
        });

        let response = server.post("/token/refresh/").json(&request).await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn refresh_rejects_access_token() -> anyhow::Result<()> {
        let (server, state) = crate::handler::test::create_test_server_with_state(routes)?;

        let access_token = state.token_keys.issue_access_token("someone")?;
        let request = serde_json::json!({ "refreshToken": access_token });

        let response = server.post("/token/refresh/").json(&request).await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn whoami_requires_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server.get("/auth/user/").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn whoami_rejects_malformed_header() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server
            .get("/auth/user/")
            .add_header("authorization", "Basic dXNlcjpwYXNz")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }
}
