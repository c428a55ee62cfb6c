//! Attendance handlers: daily presence tracking per student.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use markaz_postgres::PgClient;
use markaz_postgres::model::{AttendanceRecord, NewAttendanceRecord};
use markaz_postgres::query::{AttendanceFilter, AttendanceRepository};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AccessPolicy, CurrentUser, Json, Permission, Query, ValidateJson};
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for attendance operations.
const TRACING_TARGET: &str = "markaz_server::handler::attendance";

/// Request payload for recording attendance.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct RecordAttendanceRequest {
    /// Student this record belongs to.
    pub student_id: Uuid,
    /// Civil date the record applies to.
    pub entry_date: jiff::civil::Date,
    /// Whether the student was present.
    pub is_present: bool,
}

/// Serialized attendance record returned by the API.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttendanceResponse {
    /// Unique record identifier.
    pub record_id: Uuid,
    /// Student this record belongs to.
    pub student_id: Uuid,
    /// Civil date the record applies to.
    pub entry_date: jiff::civil::Date,
    /// Whether the student was present.
    pub is_present: bool,
    /// Timestamp when the record was created.
    pub created_at: jiff::Timestamp,
}

impl From<AttendanceRecord> for AttendanceResponse {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            record_id: record.id,
            student_id: record.student_id,
            entry_date: record.entry_date.into(),
            is_present: record.is_present,
            created_at: record.created_at.into(),
        }
    }
}

/// Records an attendance entry for a student.
///
/// Instructors may only record attendance for students of their own groups;
/// management roles may record for any student.
#[tracing::instrument(skip_all)]
async fn record_attendance(
    State(pg_client): State<PgClient>,
    current_user: CurrentUser,
    ValidateJson(request): ValidateJson<RecordAttendanceRequest>,
) -> Result<(StatusCode, Json<AttendanceResponse>)> {
    current_user.authorize(Permission::RecordAttendance)?;

    let mut conn = pg_client.get_connection().await?;
    let student = current_user
        .authorize_student_access(&mut conn, request.student_id, Permission::RecordAttendance)
        .await?;

    let new_record = NewAttendanceRecord {
        student_id: student.id,
        entry_date: request.entry_date.into(),
        is_present: request.is_present,
    };

    let record = conn.record_attendance(new_record).await?;

    tracing::info!(
        target: TRACING_TARGET,
        record_id = record.id.to_string(),
        student_id = record.student_id.to_string(),
        is_present = record.is_present,
        recorded_by = %current_user.username,
        "attendance recorded"
    );

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Query parameters for listing attendance records.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct ListAttendanceQuery {
    /// Restrict to a single student.
    pub student_id: Option<Uuid>,
    /// Restrict to students of a single group.
    pub group_id: Option<Uuid>,
}

/// Lists attendance records, optionally filtered by student or group.
#[tracing::instrument(skip_all)]
async fn list_attendance(
    State(pg_client): State<PgClient>,
    current_user: CurrentUser,
    Query(query): Query<ListAttendanceQuery>,
) -> Result<Json<Vec<AttendanceResponse>>> {
    current_user.authorize(Permission::ViewAttendance)?;

    let filter = AttendanceFilter {
        student_id: query.student_id,
        group_id: query.group_id,
    };

    let mut conn = pg_client.get_connection().await?;
    let records = conn.list_attendance(filter).await?;

    let response = records.into_iter().map(AttendanceResponse::from).collect();
    Ok(Json(response))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/attendance/", get(list_attendance).post(record_attendance))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;

    use super::routes;
    use crate::handler::test::create_test_server_with_router;

    #[tokio::test]
    async fn record_attendance_requires_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let request = serde_json::json!({
            "studentId": uuid::Uuid::new_v4(),
            "entryDate": "2025-09-01",
            "isPresent": true,
        });

        let response = server.post("/attendance/").json(&request).await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn list_attendance_requires_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server.get("/attendance/").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }
}
