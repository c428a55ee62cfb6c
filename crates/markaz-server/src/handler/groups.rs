//! Study group handlers: creation and listing.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use markaz_postgres::PgClient;
use markaz_postgres::model::{Group, NewGroup};
use markaz_postgres::query::{GroupRepository, UserRepository};
use markaz_postgres::types::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AccessPolicy, CurrentUser, Json, Path, Permission, Query, ValidateJson};
use crate::handler::request::Pagination;
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for group operations.
const TRACING_TARGET: &str = "markaz_server::handler::groups";

/// Request payload for creating a group.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateGroupRequest {
    /// Human-readable group name.
    #[validate(length(min = 2, max = 64))]
    pub display_name: String,
    /// Instructor account responsible for this group.
    pub instructor_id: Uuid,
    /// Free-form schedule description, e.g. "Mon/Wed 16:00".
    #[validate(length(min = 1, max = 256))]
    pub schedule: String,
    /// Optional monthly price.
    #[validate(range(min = 0))]
    pub price: Option<i32>,
}

/// Serialized group returned by the API.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupResponse {
    /// Unique identifier of the group.
    pub group_id: Uuid,
    /// Human-readable group name.
    pub display_name: String,
    /// Instructor account responsible for this group.
    pub instructor_id: Uuid,
    /// Free-form schedule description.
    pub schedule: String,
    /// Optional monthly price.
    pub price: Option<i32>,
    /// Timestamp when the group was created.
    pub created_at: jiff::Timestamp,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            group_id: group.id,
            display_name: group.display_name,
            instructor_id: group.instructor_id,
            schedule: group.schedule,
            price: group.price,
            created_at: group.created_at.into(),
        }
    }
}

/// Validates the account a new group is assigned to.
///
/// A missing or non-teaching account is a validation failure on the request
/// body, not a lookup miss, so both cases map to `400 Bad Request`.
fn check_instructor_role(role: Option<UserRole>) -> Result<()> {
    match role {
        Some(role) if role.is_instructor() => Ok(()),
        Some(_) => Err(ErrorKind::BadRequest
            .with_message("The referenced account does not hold the instructor role")
            .with_resource("group")
            .into_static()),
        None => Err(ErrorKind::BadRequest
            .with_message("The referenced instructor account does not exist")
            .with_resource("group")
            .into_static()),
    }
}

/// Creates a new study group.
#[tracing::instrument(skip_all)]
async fn create_group(
    State(pg_client): State<PgClient>,
    current_user: CurrentUser,
    ValidateJson(request): ValidateJson<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupResponse>)> {
    current_user.authorize(Permission::CreateGroups)?;

    let mut conn = pg_client.get_connection().await?;

    let instructor = conn.find_user_by_id(request.instructor_id).await?;
    check_instructor_role(instructor.map(|user| user.role))?;

    let new_group = NewGroup {
        display_name: request.display_name,
        instructor_id: request.instructor_id,
        schedule: request.schedule,
        price: request.price,
    };

    let group = conn.create_group(new_group).await?;

    tracing::info!(
        target: TRACING_TARGET,
        group_id = group.id.to_string(),
        instructor_id = group.instructor_id.to_string(),
        created_by = %current_user.username,
        "group created"
    );

    Ok((StatusCode::CREATED, Json(group.into())))
}

/// Lists study groups.
#[tracing::instrument(skip_all)]
async fn list_groups(
    State(pg_client): State<PgClient>,
    current_user: CurrentUser,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<GroupResponse>>> {
    current_user.authorize(Permission::ViewGroups)?;

    let mut conn = pg_client.get_connection().await?;
    let groups = conn.list_groups(pagination.into()).await?;

    let response = groups.into_iter().map(GroupResponse::from).collect();
    Ok(Json(response))
}

/// Returns a single group by its ID.
#[tracing::instrument(skip_all)]
async fn get_group(
    State(pg_client): State<PgClient>,
    current_user: CurrentUser,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupResponse>> {
    current_user.authorize(Permission::ViewGroups)?;

    let mut conn = pg_client.get_connection().await?;
    let group = conn
        .find_group_by_id(group_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("group").into_static())?;

    Ok(Json(group.into()))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/group/", get(list_groups).post(create_group))
        .route("/group/{group_id}/", get(get_group))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use markaz_postgres::types::UserRole;

    use super::{check_instructor_role, routes};
    use crate::handler::ErrorKind;
    use crate::handler::test::create_test_server_with_router;

    #[test]
    fn group_assignment_requires_an_instructor_account() {
        assert!(check_instructor_role(Some(UserRole::Instructor)).is_ok());

        let missing = check_instructor_role(None)
            .expect_err("a nonexistent account must fail validation");
        assert_eq!(missing.kind(), ErrorKind::BadRequest);

        for role in [UserRole::Owner, UserRole::Administrator, UserRole::Learner] {
            let wrong_role = check_instructor_role(Some(role))
                .expect_err("a non-teaching account must fail validation");
            assert_eq!(wrong_role.kind(), ErrorKind::BadRequest);
        }
    }

    #[tokio::test]
    async fn create_group_requires_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let request = serde_json::json!({
            "displayName": "Algebra I",
            "instructorId": uuid::Uuid::new_v4(),
            "schedule": "Mon/Wed 16:00",
        });

        let response = server.post("/group/").json(&request).await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn list_groups_requires_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server.get("/group/").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn get_group_requires_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server.get(&format!("/group/{}/", uuid::Uuid::new_v4())).await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }
}
