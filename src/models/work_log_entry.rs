//! Work log entry model.
//!
//! A [`WorkLogEntry`] is the immutable snapshot of one closed shift. Once
//! committed to the ledger it is never changed in place.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{WorkDetails, Worker};

/// A completed shift as recorded in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLogEntry {
    /// Unique identifier, assigned by the ledger on append when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// The worker who performed the shift.
    pub worker_id: String,
    /// The worker's name at the time the entry was created.
    pub worker_name: String,
    /// When the shift started.
    pub start_time: NaiveDateTime,
    /// When the shift ended.
    pub end_time: NaiveDateTime,
    /// Total worked hours.
    pub duration_hours: Decimal,
    /// Hours inside the night window.
    pub night_hours: Decimal,
    /// Flat expense allowance in euro.
    pub expense_euro: Decimal,
}

impl WorkLogEntry {
    /// Builds an entry for `worker` from already computed details.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInterval`] unless `end_time > start_time`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_engine::models::{WorkDetails, WorkLogEntry, Worker};
    /// use chrono::NaiveDateTime;
    ///
    /// let worker = Worker::driver("driver_001", "Max Mustermann");
    /// let start = NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    ///
    /// let result = WorkLogEntry::new(&worker, start, start, WorkDetails::zero());
    /// assert!(result.is_err());
    /// ```
    pub fn new(
        worker: &Worker,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        details: WorkDetails,
    ) -> EngineResult<Self> {
        if end_time <= start_time {
            return Err(EngineError::invalid_interval(format!(
                "shift end {} must be after start {}",
                end_time, start_time
            )));
        }

        Ok(Self {
            id: None,
            worker_id: worker.id.clone(),
            worker_name: worker.name.clone(),
            start_time,
            end_time,
            duration_hours: details.duration_hours,
            night_hours: details.night_hours,
            expense_euro: details.expense_euro,
        })
    }

    /// Returns the metrics recorded on this entry.
    pub fn details(&self) -> WorkDetails {
        WorkDetails {
            duration_hours: self.duration_hours,
            night_hours: self.night_hours,
            expense_euro: self.expense_euro,
        }
    }
}
