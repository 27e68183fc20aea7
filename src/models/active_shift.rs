//! Active shift marker model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The durable record of an in-progress, not-yet-closed shift.
///
/// At most one marker exists per worker. It is written by
/// [`ShiftClock::start`](crate::clock::ShiftClock::start) and removed by
/// [`ShiftClock::stop`](crate::clock::ShiftClock::stop).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveShiftMarker {
    /// The worker the open shift belongs to.
    pub worker_id: String,
    /// When the shift started (local wall clock).
    pub start_time: NaiveDateTime,
}
