//! PostgreSQL store
//!
//! Rows are mapped by hand into `tablebook-core` records. Bookings run in a
//! transaction that locks the target table row (`FOR UPDATE`) before reading
//! its reservations, so two bookings for the same table cannot both pass the
//! overlap check. Bookings for different tables do not contend.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, PgPool, Row};
use tablebook_core::{find_overlap, Interval, NewReservation, NewTable, Reservation, Table};

use super::store::{Store, StoreError};

/// Store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table_from_row(row: &PgRow) -> Result<Table, sqlx::Error> {
    Ok(Table {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        seats: row.try_get("seats")?,
        location: row.try_get("location")?,
    })
}

fn reservation_from_row(row: &PgRow) -> Result<Reservation, sqlx::Error> {
    Ok(Reservation {
        id: row.try_get("id")?,
        customer_name: row.try_get("customer_name")?,
        table_id: row.try_get("table_id")?,
        reservation_time: row.try_get("reservation_time")?,
        duration_minutes: row.try_get("duration_minutes")?,
    })
}

fn interval_from_row(row: &PgRow) -> Result<Interval, sqlx::Error> {
    Ok(Interval::new(row.try_get("starts_at")?, row.try_get("ends_at")?))
}

/// End times are computed by the database, same arithmetic as the insert path.
async fn load_intervals<'e, E>(executor: E, table_id: i32) -> Result<Vec<Interval>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query(
        r#"
        SELECT
            reservation_time AS starts_at,
            reservation_time + (INTERVAL '1 minute' * duration_minutes) AS ends_at
        FROM reservations
        WHERE table_id = $1
        ORDER BY reservation_time, id
        "#,
    )
    .bind(table_id)
    .fetch_all(executor)
    .await?;

    rows.iter().map(interval_from_row).collect()
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_tables(&self) -> Result<Vec<Table>, StoreError> {
        let rows = sqlx::query("SELECT id, name, seats, location FROM restaurant_tables ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(table_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn create_table(&self, table: NewTable) -> Result<Table, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO restaurant_tables (name, seats, location)
            VALUES ($1, $2, $3)
            RETURNING id, name, seats, location
            "#,
        )
        .bind(table.name())
        .bind(table.seats())
        .bind(table.location())
        .fetch_one(&self.pool)
        .await?;

        Ok(table_from_row(&row)?)
    }

    async fn get_table(&self, id: i32) -> Result<Table, StoreError> {
        let row = sqlx::query("SELECT id, name, seats, location FROM restaurant_tables WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::table_not_found(id))?;

        Ok(table_from_row(&row)?)
    }

    async fn delete_table(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM restaurant_tables WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(StoreError::table_not_found(id)),
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(StoreError::TableInUse { table_id: id })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_name, table_id, reservation_time, duration_minutes
            FROM reservations
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(reservation_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn get_reservation(&self, id: i32) -> Result<Reservation, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_name, table_id, reservation_time, duration_minutes
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::reservation_not_found(id))?;

        Ok(reservation_from_row(&row)?)
    }

    async fn delete_reservation(&self, id: i32) -> Result<(), StoreError> {
        let done = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if done.rows_affected() == 0 {
            return Err(StoreError::reservation_not_found(id));
        }
        Ok(())
    }

    async fn intervals_for_table(&self, table_id: i32) -> Result<Vec<Interval>, StoreError> {
        Ok(load_intervals(&self.pool, table_id).await?)
    }

    async fn book(&self, reservation: NewReservation) -> Result<Reservation, StoreError> {
        let table_id = reservation.table_id();
        let candidate = reservation.interval();

        let mut tx = self.pool.begin().await?;

        // Serializes bookings per table until commit
        let locked = sqlx::query("SELECT id FROM restaurant_tables WHERE id = $1 FOR UPDATE")
            .bind(table_id)
            .fetch_optional(&mut *tx)
            .await?;

        if locked.is_none() {
            return Err(StoreError::table_not_found(table_id));
        }

        let existing = load_intervals(&mut *tx, table_id).await?;
        if let Some(pair) = find_overlap(candidate, existing) {
            tracing::debug!(table_id, start = %candidate.start(), "booking rejected, overlap");
            return Err(StoreError::overlap(table_id, candidate, pair));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO reservations (customer_name, table_id, reservation_time, duration_minutes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_name, table_id, reservation_time, duration_minutes
            "#,
        )
        .bind(reservation.customer_name())
        .bind(table_id)
        .bind(reservation.reservation_time())
        .bind(reservation.duration_minutes())
        .fetch_one(&mut *tx)
        .await?;

        let booked = reservation_from_row(&row)?;
        tx.commit().await?;
        Ok(booked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};
    use chrono::NaiveDate;

    // Run with: DATABASE_URL=postgres://... cargo test -p tablebook-server -- --ignored

    async fn store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        PgStore::new(pool)
    }

    fn booking(table_id: i32, h: u32, m: u32, minutes: i32) -> NewReservation {
        let start = NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        NewReservation::new("Test Guest".into(), table_id, start, minutes).unwrap()
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ping_reaches_database() {
        let store = store().await;
        assert_eq!(store.backend(), "postgres");
        store.ping().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn book_then_reject_overlap() {
        let store = store().await;
        let table = store
            .create_table(NewTable::new(Some("pg-test".into()), 4, None).unwrap())
            .await
            .unwrap();

        let first = store.book(booking(table.id, 10, 0, 30)).await.unwrap();
        assert_eq!(first.table_id, table.id);

        let err = store.book(booking(table.id, 10, 15, 30)).await.unwrap_err();
        assert!(matches!(err, StoreError::Overlap { .. }));

        let second = store.book(booking(table.id, 10, 30, 30)).await.unwrap();
        let intervals = store.intervals_for_table(table.id).await.unwrap();
        assert_eq!(intervals.len(), 2);

        store.delete_reservation(first.id).await.unwrap();
        store.delete_reservation(second.id).await.unwrap();
        store.delete_table(table.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_table_with_reservations_is_restricted() {
        let store = store().await;
        let table = store
            .create_table(NewTable::new(None, 2, Some("bar".into())).unwrap())
            .await
            .unwrap();
        let booked = store.book(booking(table.id, 20, 0, 60)).await.unwrap();

        let err = store.delete_table(table.id).await.unwrap_err();
        assert!(matches!(err, StoreError::TableInUse { .. }));

        store.delete_reservation(booked.id).await.unwrap();
        store.delete_table(table.id).await.unwrap();
        let err = store.get_table(table.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_bookings_same_slot_only_one_wins() {
        let store = store().await;
        let table = store
            .create_table(NewTable::new(None, 2, None).unwrap())
            .await
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let candidate = booking(table.id, 18, 0, 90);
                tokio::spawn(async move { store.book(candidate).await })
            })
            .collect();

        let mut booked = Vec::new();
        for handle in handles {
            if let Ok(reservation) = handle.await.expect("task panicked") {
                booked.push(reservation);
            }
        }
        assert_eq!(booked.len(), 1);

        for reservation in booked {
            store.delete_reservation(reservation.id).await.unwrap();
        }
        store.delete_table(table.id).await.unwrap();
    }
}
