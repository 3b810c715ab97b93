//! Route handlers organized by resource

pub mod common;
pub mod health;
pub mod reservations;
pub mod root;
pub mod tables;
