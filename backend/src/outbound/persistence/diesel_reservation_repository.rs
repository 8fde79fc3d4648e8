//! PostgreSQL-backed `ReservationRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ReservationRepository, ReservationRepositoryError};
use crate::domain::{Reservation, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewReservationRow, ReservationRow};
use super::pool::DbPool;
use super::schema::reservations;

#[derive(Clone)]
pub struct DieselReservationRepository {
    pool: DbPool,
}

impl DieselReservationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ReservationRepositoryError {
    map_basic_diesel_error(
        error,
        ReservationRepositoryError::query,
        ReservationRepositoryError::connection,
    )
}

type ReservationSelect<'a> =
    reservations::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<ReservationRow, Pg>>>;

/// A user's reservations, latest date first and latest time within a day.
fn reservations_for_user(user_id: Uuid) -> ReservationSelect<'static> {
    reservations::table
        .filter(reservations::user_id.eq(user_id))
        .order_by((
            reservations::reservation_date.desc(),
            reservations::reservation_time.desc(),
        ))
        .select(ReservationRow::as_select())
        .into_boxed()
}

#[async_trait]
impl ReservationRepository for DieselReservationRepository {
    async fn save(&self, reservation: &Reservation) -> Result<(), ReservationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, ReservationRepositoryError::connection))?;

        diesel::insert_into(reservations::table)
            .values(NewReservationRow::from(reservation))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, ReservationRepositoryError::connection))?;

        let rows: Vec<ReservationRow> = reservations_for_user(*user_id.as_uuid())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(Reservation::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ReservationRepositoryError::query)
    }
}
