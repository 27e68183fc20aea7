//! Core data models for the Shift Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod active_shift;
mod work_details;
mod work_log_entry;
mod worker;

pub use active_shift::ActiveShiftMarker;
pub use work_details::WorkDetails;
pub use work_log_entry::WorkLogEntry;
pub use worker::{Role, Worker};
