//! PostgreSQL-backed `SessionStore` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{Session, SessionToken};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewSessionRow, SessionRow};
use super::pool::DbPool;
use super::schema::sessions;

/// Diesel-backed session store keyed by token digest.
#[derive(Clone)]
pub struct DieselSessionStore {
    pool: DbPool,
}

impl DieselSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> SessionStoreError {
    map_basic_diesel_error(error, SessionStoreError::query, SessionStoreError::connection)
}

/// Rows are keyed by the token's digest; the raw token never reaches SQL.
fn by_token(token: &SessionToken) -> diesel::dsl::Eq<sessions::token_hash, String> {
    sessions::token_hash.eq(token.digest())
}

fn new_row<'a>(token_hash: &'a str, session: &'a Session) -> NewSessionRow<'a> {
    NewSessionRow {
        token_hash,
        user_id: *session.user_id.as_uuid(),
        full_name: session.full_name.as_str(),
        email: session.email.as_str(),
        established_at: session.established_at,
    }
}

fn to_session(row: Option<SessionRow>) -> Result<Option<Session>, SessionStoreError> {
    row.map(Session::try_from)
        .transpose()
        .map_err(SessionStoreError::query)
}

#[async_trait]
impl SessionStore for DieselSessionStore {
    async fn insert(
        &self,
        token: &SessionToken,
        session: &Session,
    ) -> Result<(), SessionStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, SessionStoreError::connection))?;
        let token_hash = token.digest();
        let row = new_row(&token_hash, session);

        diesel::insert_into(sessions::table)
            .values(&row)
            .on_conflict(sessions::token_hash)
            .do_update()
            .set((
                sessions::user_id.eq(excluded(sessions::user_id)),
                sessions::full_name.eq(excluded(sessions::full_name)),
                sessions::email.eq(excluded(sessions::email)),
                sessions::established_at.eq(excluded(sessions::established_at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find(&self, token: &SessionToken) -> Result<Option<Session>, SessionStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, SessionStoreError::connection))?;

        let row: Option<SessionRow> = sessions::table
            .filter(by_token(token))
            .select(SessionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        to_session(row)
    }

    async fn remove(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, SessionStoreError::connection))?;

        diesel::delete(sessions::table.filter(by_token(token)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn touch(
        &self,
        token: &SessionToken,
        established_at: DateTime<Utc>,
    ) -> Result<Option<Session>, SessionStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, SessionStoreError::connection))?;

        let row: Option<SessionRow> =
            diesel::update(sessions::table.filter(by_token(token)))
                .set(sessions::established_at.eq(established_at))
                .returning(SessionRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
        to_session(row)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use diesel::debug_query;
    use diesel::pg::Pg;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    use super::*;
    use crate::domain::{EmailAddress, FullName, UserId};

    fn session() -> Session {
        Session {
            user_id: UserId::random(),
            full_name: FullName::new("Jane Doe").expect("name"),
            email: EmailAddress::new("jane@example.com").expect("email"),
            established_at: Utc
                .with_ymd_and_hms(2026, 3, 1, 18, 0, 0)
                .single()
                .expect("timestamp"),
        }
    }

    #[test]
    fn lookups_bind_the_digest_not_the_token() {
        let token = SessionToken::generate();
        let query = sessions::table.filter(by_token(&token));
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains(&token.digest()), "{sql}");
        assert!(!sql.contains(token.as_str()), "{sql}");
    }

    #[test]
    fn refresh_updates_only_the_timestamp() {
        let token = SessionToken::generate();
        let now = Utc::now();
        let query = diesel::update(sessions::table.filter(by_token(&token)))
            .set(sessions::established_at.eq(now))
            .returning(SessionRow::as_returning());
        let sql = debug_query::<Pg, _>(&query).to_string();

        assert!(
            sql.starts_with(r#"UPDATE "sessions" SET "established_at" = $1"#),
            "{sql}"
        );
        assert!(sql.contains(&token.digest()), "{sql}");
    }

    #[test]
    fn inserted_row_carries_the_session_identity() {
        let session = session();
        let token_hash = SessionToken::generate().digest();
        let row = new_row(&token_hash, &session);
        let stored = SessionRow {
            user_id: row.user_id,
            full_name: row.full_name.to_owned(),
            email: row.email.to_owned(),
            established_at: row.established_at,
        };

        assert_eq!(row.token_hash, token_hash);
        assert_eq!(to_session(Some(stored)).expect("valid row"), Some(session));
        assert_eq!(to_session(None).expect("no row"), None);
    }

    #[test]
    fn closed_connections_map_to_connection_errors() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));
        assert!(matches!(err, SessionStoreError::Connection { .. }), "{err}");
    }
}
