//! Student handlers: enrollment, listing and the coin leaderboard.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use markaz_postgres::PgClient;
use markaz_postgres::model::{NewStudent, NewUser, Student};
use markaz_postgres::query::{GroupRepository, StudentRepository, UserRepository};
use markaz_postgres::types::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AccessPolicy, CurrentUser, Json, Path, Permission, Query, ValidateJson};
use crate::handler::request::Pagination;
use crate::handler::{ErrorKind, Result};
use crate::service::{AuthHasher, ServiceState};

/// Tracing target for student operations.
const TRACING_TARGET: &str = "markaz_server::handler::students";

/// Request payload for enrolling a student.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateStudentRequest {
    /// Full name of the student.
    #[validate(length(min = 2, max = 128))]
    pub full_name: String,
    /// Optional linked login account.
    pub user_id: Option<Uuid>,
    /// Optional group to enroll the student in.
    pub group_id: Option<Uuid>,
    /// Optional postal address.
    #[validate(length(max = 256))]
    pub address: Option<String>,
    /// Optional contact phone number.
    #[validate(length(max = 32))]
    pub phone_number: Option<String>,
    /// Optional parent contact phone number.
    #[validate(length(max = 32))]
    pub parent_phone_number: Option<String>,
    /// Optional age in years.
    #[validate(range(min = 1, max = 120))]
    pub age: Option<i32>,
    /// Optional username for a linked learner login account.
    #[validate(length(min = 3, max = 32))]
    pub username: Option<String>,
    /// Password for the linked account; required alongside `username`.
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
}

/// Serialized student returned by the API.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudentResponse {
    /// Unique identifier of the student.
    pub student_id: Uuid,
    /// Full name of the student.
    pub full_name: String,
    /// Optional linked login account.
    pub user_id: Option<Uuid>,
    /// Optional group the student is enrolled in.
    pub group_id: Option<Uuid>,
    /// Optional postal address.
    pub address: Option<String>,
    /// Optional contact phone number.
    pub phone_number: Option<String>,
    /// Optional parent contact phone number.
    pub parent_phone_number: Option<String>,
    /// Optional age in years.
    pub age: Option<i32>,
    /// Accumulated reward coins.
    pub coins: i32,
    /// Timestamp when the student was enrolled.
    pub created_at: jiff::Timestamp,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            student_id: student.id,
            full_name: student.full_name,
            user_id: student.user_id,
            group_id: student.group_id,
            address: student.address,
            phone_number: student.phone_number,
            parent_phone_number: student.parent_phone_number,
            age: student.age,
            coins: student.coins,
            created_at: student.created_at.into(),
        }
    }
}

/// Enrolls a new student.
///
/// When `username` and `password` are provided, a learner login account is
/// created and linked to the student.
#[tracing::instrument(skip_all)]
async fn create_student(
    State(pg_client): State<PgClient>,
    State(auth_hasher): State<AuthHasher>,
    current_user: CurrentUser,
    ValidateJson(request): ValidateJson<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>)> {
    current_user.authorize(Permission::CreateStudents)?;

    let mut conn = pg_client.get_connection().await?;

    // A referenced group must exist before enrollment.
    if let Some(group_id) = request.group_id
        && conn.find_group_by_id(group_id).await?.is_none()
    {
        return Err(ErrorKind::NotFound.with_resource("group").into_static());
    }

    let user_id = match (request.username, &request.password) {
        (Some(username), Some(password)) => {
            let normalized_username = username.trim().to_lowercase();

            if conn.username_exists(&normalized_username).await? {
                return Err(ErrorKind::Conflict
                    .with_message("An account with this username already exists")
                    .with_resource("user")
                    .into_static());
            }

            let new_user = NewUser {
                username: normalized_username,
                password_hash: auth_hasher.hash_password(password)?,
                display_name: request.full_name.clone(),
                role: UserRole::Learner,
                phone_number: request.phone_number.clone(),
                email_address: None,
                address: request.address.clone(),
                age: request.age,
            };

            let user = conn.create_user(new_user).await?;
            Some(user.id)
        }
        (None, None) => request.user_id,
        _ => {
            return Err(ErrorKind::BadRequest
                .with_message("Username and password must be provided together")
                .with_resource("student")
                .into_static());
        }
    };

    let new_student = NewStudent {
        full_name: request.full_name,
        user_id,
        group_id: request.group_id,
        address: request.address,
        phone_number: request.phone_number,
        parent_phone_number: request.parent_phone_number,
        age: request.age,
    };

    let student = conn.create_student(new_student).await?;

    tracing::info!(
        target: TRACING_TARGET,
        student_id = student.id.to_string(),
        group_id = ?student.group_id,
        created_by = %current_user.username,
        "student enrolled"
    );

    Ok((StatusCode::CREATED, Json(student.into())))
}

/// Query parameters for listing students.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct ListStudentsQuery {
    /// Restrict the listing to a single group.
    pub group_id: Option<Uuid>,
    /// The number of records to skip before starting to return results.
    pub offset: Option<u32>,
    /// The maximum number of records to return in a single request.
    pub limit: Option<u32>,
}

/// Lists students, optionally filtered by group.
///
/// Instructors only see students enrolled in their own groups.
#[tracing::instrument(skip_all)]
async fn list_students(
    State(pg_client): State<PgClient>,
    current_user: CurrentUser,
    Query(query): Query<ListStudentsQuery>,
) -> Result<Json<Vec<StudentResponse>>> {
    current_user.authorize(Permission::ViewStudents)?;

    let mut conn = pg_client.get_connection().await?;

    let students = if current_user.role().is_instructor() {
        conn.find_students_by_instructor(current_user.id).await?
    } else {
        match query.group_id {
            Some(group_id) => conn.find_students_by_group(group_id).await?,
            None => {
                let pagination = Pagination {
                    offset: query.offset,
                    limit: query.limit,
                };
                conn.list_students(pagination.into()).await?
            }
        }
    };

    let response = students.into_iter().map(StudentResponse::from).collect();
    Ok(Json(response))
}

/// Returns a single student by their ID.
///
/// Instructors may only look up students enrolled in their own groups.
#[tracing::instrument(skip_all)]
async fn get_student(
    State(pg_client): State<PgClient>,
    current_user: CurrentUser,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StudentResponse>> {
    current_user.authorize(Permission::ViewStudents)?;

    let mut conn = pg_client.get_connection().await?;
    let student = current_user
        .authorize_student_access(&mut conn, student_id, Permission::ViewStudents)
        .await?;

    Ok(Json(student.into()))
}

/// Query parameters for the coin leaderboard.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct TopStudentsQuery {
    /// The number of students to return, ordered by coins.
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

impl TopStudentsQuery {
    /// Default leaderboard size.
    const DEFAULT_LIMIT: u32 = 10;
}

/// Returns students with the highest coin balances.
#[tracing::instrument(skip_all)]
async fn top_students(
    State(pg_client): State<PgClient>,
    current_user: CurrentUser,
    Query(query): Query<TopStudentsQuery>,
) -> Result<Json<Vec<StudentResponse>>> {
    current_user.authorize(Permission::ViewStudents)?;

    let limit = query.limit.unwrap_or(TopStudentsQuery::DEFAULT_LIMIT);

    let mut conn = pg_client.get_connection().await?;
    let students = conn.list_top_students(i64::from(limit)).await?;

    let response = students.into_iter().map(StudentResponse::from).collect();
    Ok(Json(response))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/student/", get(list_students).post(create_student))
        .route("/student/top/", get(top_students))
        .route("/student/{student_id}/", get(get_student))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;

    use super::routes;
    use crate::handler::test::create_test_server_with_router;

    #[tokio::test]
    async fn create_student_requires_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let request = serde_json::json!({ "fullName": "Aisha Karimova" });

        let response = server.post("/student/").json(&request).await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn list_students_requires_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server.get("/student/").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn top_students_requires_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server.get("/student/top/").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }
}
