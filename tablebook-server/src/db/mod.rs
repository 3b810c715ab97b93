//! Database layer - connection pool, schema and stores
//!
//! # Design Principles
//!
//! - One pool handed in at startup, no global engine
//! - Explicit row mapping into `tablebook-core` records
//! - Rely on DB constraints for deletes (foreign key restrict)
//! - Bookings lock their table row for the whole read-check-insert

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgStore;
pub use store::{Store, StoreError};
