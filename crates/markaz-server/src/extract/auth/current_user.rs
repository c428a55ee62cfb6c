use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;
use markaz_postgres::model::{Student, User};
use markaz_postgres::query::{GroupRepository, StudentRepository, UserRepository};
use markaz_postgres::types::UserRole;
use markaz_postgres::{PgClient, PgConn};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::extract::auth::bearer_token::AuthToken;
use crate::extract::auth::permission::{AccessPolicy, Permission, student_scoped_access};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::TokenKeys;

/// Authenticated account resolved from a verified access token.
///
/// On top of [`AuthToken`]'s stateless verification this extractor confirms
/// the account still exists, so handlers always see a live [`User`] row.
#[must_use = "current user does nothing unless you use it"]
#[derive(Debug, Clone, Deref)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// Returns the account's role.
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.0.role
    }
}

impl AccessPolicy for CurrentUser {
    fn authorize(&self, permission: Permission) -> Result<()> {
        if permission.is_permitted_by_role(self.0.role) {
            return Ok(());
        }

        tracing::debug!(
            target: TRACING_TARGET_AUTHORIZATION,
            username = self.0.username,
            role = %self.0.role,
            permission = ?permission,
            "permission denied"
        );

        Err(ErrorKind::Forbidden
            .with_context("Your role does not permit this operation")
            .into_static())
    }

    async fn authorize_student_access(
        &self,
        conn: &mut PgConn,
        student_id: Uuid,
        permission: Permission,
    ) -> Result<Student> {
        let student = conn
            .find_student_by_id(student_id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| ErrorKind::NotFound.with_resource("student").into_static())?;

        // Only instructors need the group join to decide.
        let group_instructor_id = match (self.0.role.is_instructor(), student.group_id) {
            (true, Some(group_id)) => conn
                .find_group_by_id(group_id)
                .await
                .map_err(Error::from)?
                .map(|group| group.instructor_id),
            _ => None,
        };

        student_scoped_access(permission, self.0.role, self.0.id, group_instructor_id)
            .into_result()?;
        Ok(student)
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
    PgClient: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        // Return the cached account if it was already resolved.
        if let Some(current_user) = parts.extensions.get::<Self>() {
            return Ok(current_user.clone());
        }

        let auth_token = AuthToken::from_request_parts(parts, state).await?;

        let postgres = PgClient::from_ref(state);
        let mut conn = postgres.get_connection().await.map_err(Error::from)?;

        let user = conn
            .find_user_by_username(auth_token.username())
            .await
            .map_err(Error::from)?
            .ok_or_else(|| {
                // Valid token for an account that has since been removed.
                ErrorKind::Unauthorized
                    .with_message("The account for this token no longer exists")
                    .with_resource("authentication")
                    .into_static()
            })?;

        let current_user = Self(user);
        parts.extensions.insert(current_user.clone());
        Ok(current_user)
    }
}

impl<S> OptionalFromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
    PgClient: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Option<Self>> {
        let current_user = <Self as FromRequestParts<S>>::from_request_parts(parts, state).await;
        Ok(current_user.ok())
    }
}
