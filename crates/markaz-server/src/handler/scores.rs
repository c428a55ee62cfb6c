//! Score handlers: point awards and the related coin balance updates.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use markaz_postgres::PgClient;
use markaz_postgres::model::{NewScore, Score};
use markaz_postgres::query::{ScoreRepository, StudentRepository};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::extract::{AccessPolicy, CurrentUser, Json, Permission, Query, ValidateJson};
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for score operations.
const TRACING_TARGET: &str = "markaz_server::handler::scores";

/// Request payload for recording a score.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct RecordScoreRequest {
    /// Student this score belongs to.
    pub student_id: Uuid,
    /// Civil date the score applies to.
    pub entry_date: jiff::civil::Date,
    /// Points awarded; may be negative for penalties.
    #[validate(range(min = -1000, max = 1000))]
    pub points: i32,
    /// Optional free-form reason for the award.
    #[validate(length(max = 256))]
    pub description: Option<String>,
}

/// Query parameters for recording a score.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordScoreQuery {
    /// Whether to also credit the points to the student's coin balance.
    pub coins: Option<bool>,
}

/// Serialized score returned by the API.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreResponse {
    /// Unique score identifier.
    pub score_id: Uuid,
    /// Student this score belongs to.
    pub student_id: Uuid,
    /// Civil date the score applies to.
    pub entry_date: jiff::civil::Date,
    /// Points awarded.
    pub points: i32,
    /// Optional free-form reason for the award.
    pub description: Option<String>,
    /// Timestamp when the score was created.
    pub created_at: jiff::Timestamp,
}

impl From<Score> for ScoreResponse {
    fn from(score: Score) -> Self {
        Self {
            score_id: score.id,
            student_id: score.student_id,
            entry_date: score.entry_date.into(),
            points: score.points,
            description: score.description,
            created_at: score.created_at.into(),
        }
    }
}

/// Records a score for a student.
///
/// With `?coins=true` the points are additionally credited to the student's
/// coin balance. Instructors may only record scores for students of their
/// own groups; management roles may record for any student.
#[tracing::instrument(skip_all)]
async fn record_score(
    State(pg_client): State<PgClient>,
    current_user: CurrentUser,
    Query(query): Query<RecordScoreQuery>,
    ValidateJson(request): ValidateJson<RecordScoreRequest>,
) -> Result<(StatusCode, Json<ScoreResponse>)> {
    current_user.authorize(Permission::RecordScores)?;

    let mut conn = pg_client.get_connection().await?;
    let student = current_user
        .authorize_student_access(&mut conn, request.student_id, Permission::RecordScores)
        .await?;

    let new_score = NewScore {
        student_id: student.id,
        entry_date: request.entry_date.into(),
        points: request.points,
        description: request.description,
    };

    let score = conn.record_score(new_score).await?;

    if query.coins.unwrap_or(false) {
        let updated = conn.add_coins(student.id, score.points).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            student_id = student.id.to_string(),
            coins = updated.coins,
            "coin balance credited"
        );
    }

    tracing::info!(
        target: TRACING_TARGET,
        score_id = score.id.to_string(),
        student_id = score.student_id.to_string(),
        points = score.points,
        recorded_by = %current_user.username,
        "score recorded"
    );

    Ok((StatusCode::CREATED, Json(score.into())))
}

/// Query parameters for listing scores.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListScoresQuery {
    /// Restrict to a single student.
    pub student_id: Option<Uuid>,
}

/// Lists scores, optionally filtered by student.
#[tracing::instrument(skip_all)]
async fn list_scores(
    State(pg_client): State<PgClient>,
    current_user: CurrentUser,
    Query(query): Query<ListScoresQuery>,
) -> Result<Json<Vec<ScoreResponse>>> {
    current_user.authorize(Permission::ViewScores)?;

    let mut conn = pg_client.get_connection().await?;
    let scores = conn.list_scores(query.student_id).await?;

    let response = scores.into_iter().map(ScoreResponse::from).collect();
    Ok(Json(response))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/scores/", get(list_scores).post(record_score))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;

    use super::routes;
    use crate::handler::test::create_test_server_with_router;

    #[tokio::test]
    async fn record_score_requires_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let request = serde_json::json!({
            "studentId": uuid::Uuid::new_v4(),
            "entryDate": "2025-09-01",
            "points": 10,
        });

        let response = server.post("/scores/").json(&request).await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn list_scores_requires_token() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes)?;

        let response = server.get("/scores/").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        Ok(())
    }
}
