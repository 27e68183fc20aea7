//! Shift Engine: time accounting for driver shifts
//!
//! This crate tracks labor shifts per worker and computes the pay-relevant
//! metrics of each one: worked duration, hours inside the night window and a
//! flat expense allowance for long shifts.
//!
//! - [`calculation::WorkDetailCalculator`] is the pure metric computation.
//! - [`clock::ShiftClock`] opens, polls and closes a worker's single active shift.
//! - [`ledger::ShiftLedger`] holds committed shifts and reports over them.

#![warn(missing_docs)]

pub mod calculation;
pub mod clock;
pub mod config;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod models;
pub mod store;
