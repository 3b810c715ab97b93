//! tablebook-server: HTTP API for restaurant tables and reservations
//!
//! Storage goes through the [`db::Store`] trait; the handle is built once at
//! startup and passed into the router state.

pub mod db;
pub mod http;

pub use db::{MemoryStore, PgStore, Store, StoreError};
pub use http::{build_router, run_server, ApiError, ServerConfig};
