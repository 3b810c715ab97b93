//! Storage contract shared by the Postgres and in-memory backends

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tablebook_core::{Interval, NewReservation, NewTable, Reservation, Table};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("table {table_id} is already booked from {busy_from} to {busy_until}")]
    Overlap {
        table_id: i32,
        busy_from: NaiveDateTime,
        busy_until: NaiveDateTime,
    },

    #[error("table {table_id} still has reservations")]
    TableInUse { table_id: i32 },
}

impl StoreError {
    pub(crate) fn table_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "table",
            id: id.to_string(),
        }
    }

    pub(crate) fn reservation_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "reservation",
            id: id.to_string(),
        }
    }

    /// Build the overlap error from the clashing pair, naming the booking
    /// that is already on the table rather than the candidate.
    pub(crate) fn overlap(table_id: i32, candidate: Interval, pair: (Interval, Interval)) -> Self {
        let busy = if pair.0 == candidate { pair.1 } else { pair.0 };
        Self::Overlap {
            table_id,
            busy_from: busy.start(),
            busy_until: busy.end(),
        }
    }
}

/// Table and reservation storage.
///
/// `book` is the only multi-step operation: it must confirm the table exists,
/// load that table's intervals, run the overlap check and insert, all inside
/// one unit of isolation.
#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name reported by `/health`.
    fn backend(&self) -> &'static str;

    /// Cheap round trip proving the backend can serve requests.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn list_tables(&self) -> Result<Vec<Table>, StoreError>;

    async fn create_table(&self, table: NewTable) -> Result<Table, StoreError>;

    async fn get_table(&self, id: i32) -> Result<Table, StoreError>;

    /// Fails with `TableInUse` while reservations still reference the table.
    async fn delete_table(&self, id: i32) -> Result<(), StoreError>;

    async fn list_reservations(&self) -> Result<Vec<Reservation>, StoreError>;

    async fn get_reservation(&self, id: i32) -> Result<Reservation, StoreError>;

    async fn delete_reservation(&self, id: i32) -> Result<(), StoreError>;

    /// Occupied intervals for one table, ordered by start then id.
    async fn intervals_for_table(&self, table_id: i32) -> Result<Vec<Interval>, StoreError>;

    /// Overlap-checked insert.
    async fn book(&self, reservation: NewReservation) -> Result<Reservation, StoreError>;
}
