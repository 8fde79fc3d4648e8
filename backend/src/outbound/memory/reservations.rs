use std::cmp::Reverse;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{ReservationRepository, ReservationRepositoryError};
use crate::domain::{Reservation, UserId};

use super::lock;

#[derive(Debug, Default)]
pub struct MemoryReservationRepository {
    reservations: Mutex<Vec<Reservation>>,
}

#[async_trait]
impl ReservationRepository for MemoryReservationRepository {
    async fn save(&self, reservation: &Reservation) -> Result<(), ReservationRepositoryError> {
        lock(&self.reservations).push(reservation.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Reservation>, ReservationRepositoryError> {
        let mut owned: Vec<Reservation> = lock(&self.reservations)
            .iter()
            .filter(|reservation| reservation.user_id.as_ref() == Some(user_id))
            .cloned()
            .collect();
        owned.sort_by_key(|reservation| Reverse((reservation.date, reservation.time)));
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, ReservationStatus};
    use chrono::{NaiveDate, NaiveTime, Utc};
    use uuid::Uuid;

    fn reservation(owner: Option<UserId>, day: u32, hour: u32) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            user_id: owner,
            name: "Jane Doe".to_owned(),
            email: EmailAddress::new("jane@example.com").expect("email"),
            phone: "555-0100".to_owned(),
            date: NaiveDate::from_ymd_opt(2026, 3, day).expect("date"),
            time: NaiveTime::from_hms_opt(hour, 0, 0).expect("time"),
            guests: 2,
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn listing_is_owner_scoped_and_newest_first() {
        let repo = MemoryReservationRepository::default();
        let jane = UserId::random();
        for row in [
            reservation(Some(jane), 2, 9),
            reservation(Some(jane), 3, 8),
            reservation(Some(jane), 3, 19),
            reservation(None, 4, 12),
            reservation(Some(UserId::random()), 5, 12),
        ] {
            repo.save(&row).await.expect("save");
        }

        let listed = repo.list_for_user(&jane).await.expect("list");
        let slots: Vec<_> = listed.iter().map(|r| (r.date, r.time)).collect();
        let expected: Vec<_> = [(3, 19), (3, 8), (2, 9)]
            .into_iter()
            .map(|(day, hour)| {
                let row = reservation(None, day, hour);
                (row.date, row.time)
            })
            .collect();
        assert_eq!(slots, expected);
    }
}
