//! In-process store
//!
//! Same contract as `PgStore`, held in ordered maps behind one lock.
//! Used by the router tests and by `tablebook serve --memory`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tablebook_core::{find_overlap, Interval, NewReservation, NewTable, Reservation, Table};
use tokio::sync::RwLock;

use super::store::{Store, StoreError};

#[derive(Default)]
struct Inner {
    tables: BTreeMap<i32, Table>,
    reservations: BTreeMap<i32, Reservation>,
    last_table_id: i32,
    last_reservation_id: i32,
}

impl Inner {
    fn intervals_for(&self, table_id: i32) -> Vec<Interval> {
        let mut rows: Vec<&Reservation> = self
            .reservations
            .values()
            .filter(|r| r.table_id == table_id)
            .collect();
        rows.sort_by_key(|r| (r.reservation_time, r.id));
        rows.iter().filter_map(|r| r.interval()).collect()
    }
}

/// Store kept entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_tables(&self) -> Result<Vec<Table>, StoreError> {
        Ok(self.inner.read().await.tables.values().cloned().collect())
    }

    async fn create_table(&self, table: NewTable) -> Result<Table, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_table_id += 1;
        let table = table.into_table(inner.last_table_id);
        inner.tables.insert(table.id, table.clone());
        Ok(table)
    }

    async fn get_table(&self, id: i32) -> Result<Table, StoreError> {
        self.inner
            .read()
            .await
            .tables
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::table_not_found(id))
    }

    async fn delete_table(&self, id: i32) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.tables.contains_key(&id) {
            return Err(StoreError::table_not_found(id));
        }
        if inner.reservations.values().any(|r| r.table_id == id) {
            return Err(StoreError::TableInUse { table_id: id });
        }
        inner.tables.remove(&id);
        Ok(())
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, StoreError> {
        Ok(self.inner.read().await.reservations.values().cloned().collect())
    }

    async fn get_reservation(&self, id: i32) -> Result<Reservation, StoreError> {
        self.inner
            .read()
            .await
            .reservations
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::reservation_not_found(id))
    }

    async fn delete_reservation(&self, id: i32) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .reservations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::reservation_not_found(id))
    }

    async fn intervals_for_table(&self, table_id: i32) -> Result<Vec<Interval>, StoreError> {
        Ok(self.inner.read().await.intervals_for(table_id))
    }

    async fn book(&self, reservation: NewReservation) -> Result<Reservation, StoreError> {
        let table_id = reservation.table_id();
        let candidate = reservation.interval();

        // Write lock held across check and insert
        let mut inner = self.inner.write().await;
        if !inner.tables.contains_key(&table_id) {
            return Err(StoreError::table_not_found(table_id));
        }

        if let Some(pair) = find_overlap(candidate, inner.intervals_for(table_id)) {
            tracing::debug!(table_id, start = %candidate.start(), "booking rejected, overlap");
            return Err(StoreError::overlap(table_id, candidate, pair));
        }

        inner.last_reservation_id += 1;
        let booked = reservation.into_reservation(inner.last_reservation_id);
        inner.reservations.insert(booked.id, booked.clone());
        Ok(booked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Arc;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn booking(table_id: i32, h: u32, m: u32, minutes: i32) -> NewReservation {
        NewReservation::new("Grace".into(), table_id, at(h, m), minutes).unwrap()
    }

    async fn store_with_table() -> (MemoryStore, Table) {
        let store = MemoryStore::new();
        let table = store
            .create_table(NewTable::new(Some("T1".into()), 4, None).unwrap())
            .await
            .unwrap();
        (store, table)
    }

    #[tokio::test]
    async fn ids_are_sequential() {
        let store = MemoryStore::new();
        let a = store.create_table(NewTable::new(None, 2, None).unwrap()).await.unwrap();
        let b = store.create_table(NewTable::new(None, 2, None).unwrap()).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let a = store.create_table(NewTable::new(None, 2, None).unwrap()).await.unwrap();
        store.delete_table(a.id).await.unwrap();
        let b = store.create_table(NewTable::new(None, 2, None).unwrap()).await.unwrap();
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn book_rejects_overlap_and_accepts_touching() {
        let (store, table) = store_with_table().await;
        store.book(booking(table.id, 10, 0, 30)).await.unwrap();

        let err = store.book(booking(table.id, 10, 15, 30)).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Overlap { table_id, busy_from, .. } if table_id == table.id && busy_from == at(10, 0)
        ));

        store.book(booking(table.id, 10, 30, 30)).await.unwrap();
        store.book(booking(table.id, 9, 0, 30)).await.unwrap();
        assert_eq!(store.intervals_for_table(table.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn other_tables_do_not_conflict() {
        let (store, first) = store_with_table().await;
        let second = store
            .create_table(NewTable::new(None, 2, None).unwrap())
            .await
            .unwrap();

        store.book(booking(first.id, 19, 0, 120)).await.unwrap();
        store.book(booking(second.id, 19, 0, 120)).await.unwrap();
    }

    #[tokio::test]
    async fn book_unknown_table_is_not_found() {
        let store = MemoryStore::new();
        let err = store.book(booking(42, 12, 0, 30)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { resource: "table", .. }));
        assert!(store.list_reservations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_table_restricted_while_booked() {
        let (store, table) = store_with_table().await;
        let booked = store.book(booking(table.id, 12, 0, 60)).await.unwrap();

        let err = store.delete_table(table.id).await.unwrap_err();
        assert!(matches!(err, StoreError::TableInUse { .. }));

        store.delete_reservation(booked.id).await.unwrap();
        store.delete_table(table.id).await.unwrap();
        assert!(store.list_tables().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_rows() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.delete_table(1).await.unwrap_err(),
            StoreError::NotFound { resource: "table", .. }
        ));
        assert!(matches!(
            store.delete_reservation(1).await.unwrap_err(),
            StoreError::NotFound { resource: "reservation", .. }
        ));
    }

    #[tokio::test]
    async fn concurrent_bookings_same_slot_only_one_wins() {
        let (store, table) = store_with_table().await;
        let store = Arc::new(store);
        let table_id = table.id;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.book(booking(table_id, 18, 0, 90)).await })
            })
            .collect();

        let mut wins = 0;
        for handle in handles {
            if handle.await.expect("task panicked").is_ok() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
    }
}
