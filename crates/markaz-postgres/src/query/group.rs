//! Group repository for managing study groups.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::Pagination;
use crate::model::{Group, NewGroup};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for study group database operations.
pub trait GroupRepository {
    /// Creates a new study group.
    fn create_group(&mut self, new_group: NewGroup)
    -> impl Future<Output = PgResult<Group>> + Send;

    /// Finds a group by its unique identifier.
    fn find_group_by_id(
        &mut self,
        group_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Group>>> + Send;

    /// Lists all groups with pagination support.
    ///
    /// Groups are ordered by creation time with most recent first.
    fn list_groups(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Group>>> + Send;

    /// Finds all groups taught by the given instructor.
    fn find_groups_by_instructor(
        &mut self,
        instructor_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<Group>>> + Send;
}

impl GroupRepository for PgConnection {
    async fn create_group(&mut self, mut new_group: NewGroup) -> PgResult<Group> {
        use schema::groups;

        // Normalize fields: trim whitespace
        new_group.display_name = new_group.display_name.trim().to_owned();
        new_group.schedule = new_group.schedule.trim().to_owned();

        diesel::insert_into(groups::table)
            .values(&new_group)
            .returning(Group::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_group_by_id(&mut self, group_id: Uuid) -> PgResult<Option<Group>> {
        use schema::groups::{self, dsl};

        groups::table
            .filter(dsl::id.eq(group_id))
            .select(Group::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_groups(&mut self, pagination: Pagination) -> PgResult<Vec<Group>> {
        use schema::groups::{self, dsl};

        groups::table
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Group::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_groups_by_instructor(&mut self, instructor_id: Uuid) -> PgResult<Vec<Group>> {
        use schema::groups::{self, dsl};

        groups::table
            .filter(dsl::instructor_id.eq(instructor_id))
            .order(dsl::created_at.desc())
            .select(Group::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}
