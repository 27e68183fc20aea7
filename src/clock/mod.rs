//! The shift clock: per-worker lifecycle of the active shift.
//!
//! A [`ShiftClock`] moves a worker between `Idle` and `Active`, persisting an
//! [`ActiveShiftMarker`](crate::models::ActiveShiftMarker) while a shift is
//! open and committing a [`WorkLogEntry`](crate::models::WorkLogEntry) to the
//! ledger when it closes. A [`LiveTicker`] delivers live metrics in between.

mod marker;
mod shift_clock;
mod ticker;

pub use marker::{clear_marker, load_marker, save_marker};
pub use shift_clock::{ClockState, ShiftClock};
pub use ticker::{LiveTick, LiveTicker, LocalClock, WallClock};
