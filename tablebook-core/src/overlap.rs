//! Reservation overlap check
//!
//! Intervals are end-exclusive: `[start, end)`. Two intervals that touch at a
//! single instant do not overlap.
//!
//! The check sorts the existing intervals together with the candidate and
//! scans neighbours, flagging any pair where the earlier one ends after the
//! later one starts. The sort is stable, so intervals sharing a start keep
//! input order (existing rows first, candidate last). With strictly positive
//! durations an equal start is always flagged, whatever the order.

use chrono::{NaiveDateTime, TimeDelta};

/// Time span occupied by a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Build `[start, start + minutes)`, or `None` if the end is not representable.
    pub fn from_minutes(start: NaiveDateTime, minutes: i32) -> Option<Self> {
        let span = TimeDelta::try_minutes(minutes.into())?;
        let end = start.checked_add_signed(span)?;
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Return the first overlapping `(earlier, later)` pair once `candidate` is
/// added to `existing`, or `None` if the candidate fits.
///
/// `existing` must already be restricted to a single table.
pub fn find_overlap<I>(candidate: Interval, existing: I) -> Option<(Interval, Interval)>
where
    I: IntoIterator<Item = Interval>,
{
    let mut intervals: Vec<Interval> = existing.into_iter().collect();
    intervals.push(candidate);
    intervals.sort_by_key(Interval::start);

    intervals
        .windows(2)
        .find(|pair| pair[0].end > pair[1].start)
        .map(|pair| (pair[0], pair[1]))
}

/// Accept/reject decision for a candidate interval.
pub fn is_free<I>(candidate: Interval, existing: I) -> bool
where
    I: IntoIterator<Item = Interval>,
{
    find_overlap(candidate, existing).is_none()
}
