//! Reservation records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Interval, ValidationError};

/// A stored reservation, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i32,
    pub customer_name: String,
    pub table_id: i32,
    pub reservation_time: NaiveDateTime,
    pub duration_minutes: i32,
}

impl Reservation {
    /// The occupied span, `None` only for rows whose end overflows.
    pub fn interval(&self) -> Option<Interval> {
        Interval::from_minutes(self.reservation_time, self.duration_minutes)
    }
}

/// Validated input for booking a table.
///
/// Construction guarantees a non-blank customer name, a positive table id,
/// a positive duration, and a representable end time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    customer_name: String,
    table_id: i32,
    interval: Interval,
    duration_minutes: i32,
}

impl NewReservation {
    pub fn new(
        customer_name: String,
        table_id: i32,
        reservation_time: NaiveDateTime,
        duration_minutes: i32,
    ) -> Result<Self, ValidationError> {
        if customer_name.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "customer_name",
            });
        }

        if table_id <= 0 {
            return Err(ValidationError::NotPositive {
                field: "table_id",
                value: table_id.into(),
            });
        }

        if duration_minutes <= 0 {
            return Err(ValidationError::NotPositive {
                field: "duration_minutes",
                value: duration_minutes.into(),
            });
        }

        let interval = Interval::from_minutes(reservation_time, duration_minutes).ok_or(
            ValidationError::OutOfRange {
                field: "duration_minutes",
            },
        )?;

        Ok(Self {
            customer_name,
            table_id,
            interval,
            duration_minutes,
        })
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn table_id(&self) -> i32 {
        self.table_id
    }

    pub fn reservation_time(&self) -> NaiveDateTime {
        self.interval.start()
    }

    pub fn duration_minutes(&self) -> i32 {
        self.duration_minutes
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Attach a system-assigned id, producing the stored record.
    pub fn into_reservation(self, id: i32) -> Reservation {
        Reservation {
            id,
            reservation_time: self.interval.start(),
            customer_name: self.customer_name,
            table_id: self.table_id,
            duration_minutes: self.duration_minutes,
        }
    }
}
