//! Score repository for points awarded to students.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{NewScore, Score};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for score database operations.
pub trait ScoreRepository {
    /// Records a score entry for a student.
    fn record_score(&mut self, new_score: NewScore)
    -> impl Future<Output = PgResult<Score>> + Send;

    /// Lists score records, optionally restricted to a single student.
    ///
    /// Records are ordered by entry date with most recent first.
    fn list_scores(
        &mut self,
        student_id: Option<Uuid>,
    ) -> impl Future<Output = PgResult<Vec<Score>>> + Send;
}

impl ScoreRepository for PgConnection {
    async fn record_score(&mut self, new_score: NewScore) -> PgResult<Score> {
        use schema::scores;

        diesel::insert_into(scores::table)
            .values(&new_score)
            .returning(Score::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_scores(&mut self, student_id: Option<Uuid>) -> PgResult<Vec<Score>> {
        use schema::scores::{self, dsl};

        let mut query = scores::table.into_boxed();

        if let Some(student_id) = student_id {
            query = query.filter(dsl::student_id.eq(student_id));
        }

        query
            .order(dsl::entry_date.desc())
            .select(Score::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
