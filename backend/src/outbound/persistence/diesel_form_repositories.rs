//! PostgreSQL-backed contact and feedback repositories.

use async_trait::async_trait;
use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    ContactRepository, ContactRepositoryError, FeedbackRepository, FeedbackRepositoryError,
};
use crate::domain::{ContactMessage, FeedbackEntry};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{FeedbackRow, NewContactRow, NewFeedbackRow};
use super::pool::DbPool;
use super::schema::{contacts, feedback};

#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_contact_error(error: diesel::result::Error) -> ContactRepositoryError {
    map_basic_diesel_error(
        error,
        ContactRepositoryError::query,
        ContactRepositoryError::connection,
    )
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn save(&self, message: &ContactMessage) -> Result<(), ContactRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, ContactRepositoryError::connection))?;

        diesel::insert_into(contacts::table)
            .values(NewContactRow::from(message))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_contact_error)
    }
}

#[derive(Clone)]
pub struct DieselFeedbackRepository {
    pool: DbPool,
}

impl DieselFeedbackRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type FeedbackSelect = feedback::BoxedQuery<'static, Pg, SqlTypeOf<AsSelect<FeedbackRow, Pg>>>;

/// The `limit` newest entries, newest first.
fn newest_feedback(limit: i64) -> FeedbackSelect {
    feedback::table
        .order_by(feedback::created_at.desc())
        .limit(limit)
        .select(FeedbackRow::as_select())
        .into_boxed()
}

fn map_feedback_error(error: diesel::result::Error) -> FeedbackRepositoryError {
    map_basic_diesel_error(
        error,
        FeedbackRepositoryError::query,
        FeedbackRepositoryError::connection,
    )
}

#[async_trait]
impl FeedbackRepository for DieselFeedbackRepository {
    async fn save(&self, entry: &FeedbackEntry) -> Result<(), FeedbackRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, FeedbackRepositoryError::connection))?;

        diesel::insert_into(feedback::table)
            .values(NewFeedbackRow::from(entry))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_feedback_error)
    }

    async fn list_recent(
        &self,
        limit: usize,
    ) -> Result<Vec<FeedbackEntry>, FeedbackRepositoryError> {
        let limit = i64::try_from(limit)
            .map_err(|_| FeedbackRepositoryError::query("feedback limit out of range"))?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, FeedbackRepositoryError::connection))?;

        let rows: Vec<FeedbackRow> = newest_feedback(limit).load(&mut conn)
            .await
            .map_err(map_feedback_error)?;

        rows.into_iter()
            .map(FeedbackEntry::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(FeedbackRepositoryError::query)
    }
}
