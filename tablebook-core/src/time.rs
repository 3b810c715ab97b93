//! Reservation time parsing
//!
//! Reservation times are stored naive. A caller may send an offset
//! (`2024-05-01T10:00:00+03:00`); the offset is dropped and the wall-clock
//! reading kept as-is, so the example above is stored as `10:00`, not
//! converted to `07:00` UTC.
//!
//! Parsed values are normalized to what a PostgreSQL `TIMESTAMP` holds:
//! microsecond precision, no leap seconds, years from 4713 BC onwards.

use chrono::{DateTime, Datelike, NaiveDateTime, SubsecRound, TimeDelta, Timelike};

use crate::ValidationError;

/// Naive layouts accepted after RFC 3339 fails.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Earliest year a `TIMESTAMP` column accepts (4713 BC, proleptic ISO year).
const MIN_YEAR: i32 = -4712;

/// Parse a caller-supplied reservation time, stripping any timezone.
pub fn parse_reservation_time(input: &str) -> Result<NaiveDateTime, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Empty {
            field: "reservation_time",
        });
    }

    let parsed = match DateTime::parse_from_rfc3339(input) {
        Ok(with_offset) => with_offset.naive_local(),
        Err(_) => NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
            .ok_or(ValidationError::InvalidFormat {
                field: "reservation_time",
                reason: "expected an ISO 8601 date-time such as 2024-05-01T19:30:00",
            })?,
    };

    normalize(parsed)
}

/// Fold a leap second into the following second and drop sub-microsecond
/// digits, so the overlap check sees the instant that will be stored.
fn normalize(time: NaiveDateTime) -> Result<NaiveDateTime, ValidationError> {
    let out_of_range = ValidationError::OutOfRange {
        field: "reservation_time",
    };

    let nanos = time.nanosecond();
    let folded = if nanos >= 1_000_000_000 {
        time.with_nanosecond(nanos - 1_000_000_000)
            .and_then(|t| t.checked_add_signed(TimeDelta::seconds(1)))
            .ok_or_else(|| out_of_range.clone())?
    } else {
        time
    };

    let normalized = folded.trunc_subsecs(6);
    if normalized.year() < MIN_YEAR {
        return Err(out_of_range);
    }
    Ok(normalized)
}
