//! tablebook-core: restaurant tables, reservations and the overlap check
//!
//! Everything in this crate is pure: typed records validated at
//! construction, and the interval logic that decides whether a new
//! reservation fits on a table. Storage and HTTP live in `tablebook-server`.

pub mod overlap;
pub mod reservation;
pub mod table;
pub mod time;
pub mod validation;

pub use overlap::{find_overlap, is_free, Interval};
pub use reservation::{NewReservation, Reservation};
pub use table::{NewTable, Table};
pub use time::parse_reservation_time;
pub use validation::ValidationError;
