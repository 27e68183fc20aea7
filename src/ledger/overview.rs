//! Reporting views over the ledger.
//!
//! These are read-only projections built on demand for the supervisor view:
//! entries grouped per worker, ledger-wide totals, and a per-driver status
//! board combining live markers with committed history.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{WorkDetails, WorkLogEntry};

/// One worker's entries, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerLogGroup {
    /// The worker the entries belong to.
    pub worker_id: String,
    /// The worker name stamped on the most recent entry.
    pub worker_name: String,
    /// The worker's entries ordered by start time, newest first.
    pub entries: Vec<WorkLogEntry>,
}

/// Totals across a set of entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Number of entries.
    pub entry_count: usize,
    /// Number of distinct workers with at least one entry.
    pub worker_count: usize,
    /// Sum of worked hours.
    pub total_duration_hours: Decimal,
    /// Sum of night hours.
    pub total_night_hours: Decimal,
    /// Sum of expense allowances.
    pub total_expense_euro: Decimal,
}

/// Whether a driver currently has an open shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    /// An active shift marker exists.
    Working,
    /// No shift is open.
    NotActive,
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverStatus::Working => write!(f, "Working"),
            DriverStatus::NotActive => write!(f, "Not active"),
        }
    }
}

/// One row of the driver status board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverOverview {
    /// The driver's id.
    pub worker_id: String,
    /// The driver's current name from the roster.
    pub worker_name: String,
    /// Whether a shift is open.
    pub status: DriverStatus,
    /// Live metrics of the open shift, if any.
    pub current_shift: Option<WorkDetails>,
    /// Number of committed entries.
    pub total_logs: usize,
    /// The committed entry that ended most recently.
    pub last_log: Option<WorkLogEntry>,
}

/// Sorts entries newest first by start time.
pub(crate) fn sort_newest_first(entries: &mut [WorkLogEntry]) {
    entries.sort_by(|a, b| b.start_time.cmp(&a.start_time));
}

/// Groups entries by worker id, each group sorted newest first.
pub(crate) fn group_by_worker(entries: Vec<WorkLogEntry>) -> Vec<WorkerLogGroup> {
    let mut grouped: BTreeMap<String, Vec<WorkLogEntry>> = BTreeMap::new();
    for entry in entries {
        grouped.entry(entry.worker_id.clone()).or_default().push(entry);
    }

    grouped
        .into_iter()
        .map(|(worker_id, mut entries)| {
            sort_newest_first(&mut entries);
            let worker_name = entries
                .first()
                .map(|e| e.worker_name.clone())
                .unwrap_or_default();
            WorkerLogGroup {
                worker_id,
                worker_name,
                entries,
            }
        })
        .collect()
}

/// Sums a set of entries.
pub(crate) fn summarize(entries: &[WorkLogEntry]) -> LedgerSummary {
    let mut workers: Vec<&str> = entries.iter().map(|e| e.worker_id.as_str()).collect();
    workers.sort_unstable();
    workers.dedup();

    LedgerSummary {
        entry_count: entries.len(),
        worker_count: workers.len(),
        total_duration_hours: entries.iter().map(|e| e.duration_hours).sum(),
        total_night_hours: entries.iter().map(|e| e.night_hours).sum(),
        total_expense_euro: entries.iter().map(|e| e.expense_euro).sum(),
    }
}

/// Returns the entry with the latest end time.
pub(crate) fn last_ended(entries: &[WorkLogEntry]) -> Option<WorkLogEntry> {
    entries.iter().max_by_key(|e| e.end_time).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Worker;
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn entry(worker: &Worker, start: &str, end: &str, hours: &str, night: &str) -> WorkLogEntry {
        let fmt = "%Y-%m-%d %H:%M:%S";
        WorkLogEntry::new(
            worker,
            NaiveDateTime::parse_from_str(start, fmt).unwrap(),
            NaiveDateTime::parse_from_str(end, fmt).unwrap(),
            WorkDetails {
                duration_hours: dec(hours),
                night_hours: dec(night),
                expense_euro: if dec(hours) > dec("8") {
                    dec("13.00")
                } else {
                    Decimal::ZERO
                },
            },
        )
        .unwrap()
    }

    #[test]
    fn test_group_by_worker_sorts_and_names_groups() {
        let max = Worker::driver("d1", "Max");
        let erika = Worker::driver("d2", "Erika");
        let entries = vec![
            entry(&max, "2026-01-14 08:00:00", "2026-01-14 16:00:00", "8", "0"),
            entry(&erika, "2026-01-15 22:00:00", "2026-01-16 06:00:00", "8", "8"),
            entry(&max, "2026-01-15 08:00:00", "2026-01-15 17:00:00", "9", "0"),
        ];

        let groups = group_by_worker(entries);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].worker_id, "d1");
        assert_eq!(groups[0].worker_name, "Max");
        assert_eq!(groups[0].entries.len(), 2);
        assert!(groups[0].entries[0].start_time > groups[0].entries[1].start_time);
        assert_eq!(groups[1].worker_name, "Erika");
    }

    #[test]
    fn test_summarize_totals() {
        let max = Worker::driver("d1", "Max");
        let erika = Worker::driver("d2", "Erika");
        let entries = vec![
            entry(&max, "2026-01-15 08:00:00", "2026-01-15 17:00:00", "9", "0"),
            entry(&max, "2026-01-16 08:00:00", "2026-01-16 10:30:00", "2.5", "0"),
            entry(&erika, "2026-01-15 22:00:00", "2026-01-16 06:00:00", "8", "8"),
        ];

        let summary = summarize(&entries);
        assert_eq!(summary.entry_count, 3);
        assert_eq!(summary.worker_count, 2);
        assert_eq!(summary.total_duration_hours, dec("19.5"));
        assert_eq!(summary.total_night_hours, dec("8"));
        assert_eq!(summary.total_expense_euro, dec("13.00"));
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), LedgerSummary::default());
    }

    #[test]
    fn test_last_ended_uses_end_time() {
        let max = Worker::driver("d1", "Max");
        let entries = vec![
            entry(&max, "2026-01-15 06:00:00", "2026-01-15 20:00:00", "14", "0"),
            entry(&max, "2026-01-15 07:00:00", "2026-01-15 09:00:00", "2", "0"),
        ];

        let last = last_ended(&entries).unwrap();
        assert_eq!(last.duration_hours, dec("14"));
    }

    #[test]
    fn test_driver_status_display() {
        assert_eq!(DriverStatus::Working.to_string(), "Working");
        assert_eq!(DriverStatus::NotActive.to_string(), "Not active");
    }
}
