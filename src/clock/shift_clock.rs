//! The per-worker shift lifecycle state machine.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::calculation::WorkDetailCalculator;
use crate::error::{EngineError, EngineResult};
use crate::identity::IdentityProvider;
use crate::ledger::{RecordStore, ShiftLedger};
use crate::models::{ActiveShiftMarker, WorkDetails, WorkLogEntry, Worker};
use crate::store::KeyValueStore;

use super::marker::{clear_marker, load_marker, save_marker};
use super::ticker::{LiveTicker, LocalClock, WallClock};

/// The lifecycle state of a worker's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// No shift is open.
    Idle,
    /// A shift is open since `started_at`.
    Active {
        /// When the open shift started.
        started_at: NaiveDateTime,
    },
}

/// Opens, polls and closes the single active shift of one worker.
///
/// The persisted [`ActiveShiftMarker`] is authoritative. Every operation
/// re-reads it, so a second session working on the same worker is detected
/// instead of silently overwritten:
///
/// - `start` fails with [`EngineError::AlreadyActive`] whenever a marker exists.
/// - `poll`/`stop` adopt a marker written elsewhere while this clock was idle.
/// - `poll`/`stop` fail with [`EngineError::MarkerConflict`] when the marker's
///   start differs from the shift this clock opened.
/// - A marker removed elsewhere turns this clock idle.
///
/// In-memory state only changes after the store acknowledges the write.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use shift_engine::calculation::WorkDetailCalculator;
/// use shift_engine::clock::ShiftClock;
/// use shift_engine::ledger::{KeyValueRecordStore, ShiftLedger};
/// use shift_engine::models::Worker;
/// use shift_engine::store::MemoryStore;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let store = Arc::new(MemoryStore::new());
/// let ledger = ShiftLedger::new(KeyValueRecordStore::new(store.clone()));
/// let mut clock = ShiftClock::open(
///     Worker::driver("driver_001", "Max Mustermann"),
///     store,
///     ledger,
///     WorkDetailCalculator::default(),
/// )?;
///
/// let start = NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-01-15 18:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// clock.start(start)?;
/// let entry = clock.stop(end)?;
/// assert_eq!(entry.duration_hours, Decimal::new(9, 0));
/// assert_eq!(entry.expense_euro, Decimal::new(13, 0));
/// assert!(!clock.is_active());
/// # Ok::<(), shift_engine::error::EngineError>(())
/// ```
pub struct ShiftClock<S, R> {
    worker: Worker,
    store: S,
    ledger: ShiftLedger<R>,
    calculator: WorkDetailCalculator,
    wall_clock: Arc<dyn WallClock>,
    state: ClockState,
    ticker: Option<CancellationToken>,
}

impl<S: KeyValueStore, R: RecordStore> ShiftClock<S, R> {
    /// Opens the clock for `worker`, restoring an open shift from its
    /// persisted marker.
    ///
    /// # Errors
    ///
    /// Propagates store failures and undecodable markers.
    pub fn open(
        worker: Worker,
        store: S,
        ledger: ShiftLedger<R>,
        calculator: WorkDetailCalculator,
    ) -> EngineResult<Self> {
        let state = match load_marker(&store, &worker.id)? {
            Some(marker) => {
                info!(
                    worker_id = %worker.id,
                    started_at = %marker.start_time,
                    "Restored active shift"
                );
                ClockState::Active {
                    started_at: marker.start_time,
                }
            }
            None => ClockState::Idle,
        };

        Ok(Self {
            worker,
            store,
            ledger,
            calculator,
            wall_clock: Arc::new(LocalClock),
            state,
            ticker: None,
        })
    }

    /// Opens the clock for the worker supplied by `identity`.
    pub fn for_current_worker<I>(
        identity: &I,
        store: S,
        ledger: ShiftLedger<R>,
        calculator: WorkDetailCalculator,
    ) -> EngineResult<Self>
    where
        I: IdentityProvider + ?Sized,
    {
        Self::open(identity.current_worker()?, store, ledger, calculator)
    }

    /// Replaces the time source used by live tickers.
    pub fn with_wall_clock(mut self, wall_clock: Arc<dyn WallClock>) -> Self {
        self.wall_clock = wall_clock;
        self
    }

    /// Returns the worker this clock belongs to.
    pub fn worker(&self) -> &Worker {
        &self.worker
    }

    /// Returns the in-memory state as of the last operation.
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Returns true if a shift was open as of the last operation.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ClockState::Active { .. })
    }

    /// Returns the ledger entries are committed to.
    pub fn ledger(&self) -> &ShiftLedger<R> {
        &self.ledger
    }

    /// Opens a shift starting at `now`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::AlreadyActive`] if a marker already exists; it is
    ///   never overwritten.
    /// - [`EngineError::StoreUnavailable`] if the marker cannot be written;
    ///   the clock stays idle.
    pub fn start(&mut self, now: NaiveDateTime) -> EngineResult<ActiveShiftMarker> {
        if let Some(existing) = load_marker(&self.store, &self.worker.id)? {
            self.state = ClockState::Active {
                started_at: existing.start_time,
            };
            return Err(EngineError::AlreadyActive {
                worker_id: self.worker.id.clone(),
                started_at: existing.start_time,
            });
        }

        if let ClockState::Active { started_at } = self.state {
            warn!(
                worker_id = %self.worker.id,
                started_at = %started_at,
                "Active marker was removed by another session"
            );
            self.state = ClockState::Idle;
            self.cancel_ticker();
        }

        let marker = ActiveShiftMarker {
            worker_id: self.worker.id.clone(),
            start_time: now,
        };
        save_marker(&self.store, &marker)?;
        self.state = ClockState::Active { started_at: now };

        info!(worker_id = %self.worker.id, started_at = %now, "Shift started");
        Ok(marker)
    }

    /// Returns the open shift's metrics as of `now`. Nothing is persisted.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NoActiveShift`] if no shift is open.
    /// - [`EngineError::MarkerConflict`] if another session replaced the shift.
    /// - [`EngineError::InvalidInterval`] if `now` precedes the shift start.
    pub fn poll(&mut self, now: NaiveDateTime) -> EngineResult<WorkDetails> {
        let started_at = self.sync_active()?;
        self.calculator.compute(started_at, now)
    }

    /// Closes the open shift at `now` and commits it to the ledger.
    ///
    /// The marker is removed before the ledger append. If the append fails
    /// the marker is restored and the clock stays active.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NoActiveShift`] if no shift is open.
    /// - [`EngineError::MarkerConflict`] if another session replaced the shift.
    /// - [`EngineError::InvalidInterval`] unless `now` is after the shift start.
    /// - [`EngineError::StoreUnavailable`] if the marker or ledger write fails.
    pub fn stop(&mut self, now: NaiveDateTime) -> EngineResult<WorkLogEntry> {
        let started_at = self.sync_active()?;
        let details = self.calculator.compute(started_at, now)?;
        let entry = WorkLogEntry::new(&self.worker, started_at, now, details)?;

        clear_marker(&self.store, &self.worker.id)?;

        let stored = match self.ledger.append(entry) {
            Ok(stored) => stored,
            Err(err) => {
                warn!(
                    worker_id = %self.worker.id,
                    error = %err,
                    "Ledger append failed, restoring active marker"
                );
                let marker = ActiveShiftMarker {
                    worker_id: self.worker.id.clone(),
                    start_time: started_at,
                };
                if let Err(restore_err) = save_marker(&self.store, &marker) {
                    warn!(
                        worker_id = %self.worker.id,
                        error = %restore_err,
                        "Active marker could not be restored"
                    );
                }
                return Err(err);
            }
        };

        self.state = ClockState::Idle;
        self.cancel_ticker();

        info!(
            worker_id = %self.worker.id,
            started_at = %started_at,
            ended_at = %now,
            duration_hours = %stored.duration_hours,
            night_hours = %stored.night_hours,
            "Shift stopped"
        );
        Ok(stored)
    }

    /// Starts delivering live metrics for the open shift every `period`.
    ///
    /// A previous subscription from this clock is cancelled. The ticker is
    /// cancelled when the shift stops.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidConfig`] if `period` is zero.
    /// - Otherwise the same as [`poll`](Self::poll), except that a future
    ///   start is allowed and reports zero metrics.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn subscribe(&mut self, period: Duration) -> EngineResult<LiveTicker> {
        if period.is_zero() {
            return Err(EngineError::InvalidConfig {
                field: "period".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        let started_at = self.sync_active()?;
        self.cancel_ticker();

        let token = CancellationToken::new();
        let ticker = LiveTicker::spawn(
            started_at,
            self.calculator,
            self.wall_clock.clone(),
            period,
            token.clone(),
        );
        self.ticker = Some(token);
        Ok(ticker)
    }

    /// Reconciles the in-memory state with the persisted marker and returns
    /// the open shift's start.
    fn sync_active(&mut self) -> EngineResult<NaiveDateTime> {
        let persisted = load_marker(&self.store, &self.worker.id)?;

        match (self.state, persisted) {
            (state, None) => {
                if let ClockState::Active { started_at } = state {
                    warn!(
                        worker_id = %self.worker.id,
                        started_at = %started_at,
                        "Active marker was removed by another session"
                    );
                    self.state = ClockState::Idle;
                    self.cancel_ticker();
                }
                Err(EngineError::NoActiveShift {
                    worker_id: self.worker.id.clone(),
                })
            }
            (ClockState::Idle, Some(marker)) => {
                warn!(
                    worker_id = %self.worker.id,
                    started_at = %marker.start_time,
                    "Adopting active marker written by another session"
                );
                self.state = ClockState::Active {
                    started_at: marker.start_time,
                };
                Ok(marker.start_time)
            }
            (ClockState::Active { started_at }, Some(marker)) => {
                if marker.start_time == started_at {
                    Ok(started_at)
                } else {
                    Err(EngineError::MarkerConflict {
                        worker_id: self.worker.id.clone(),
                        expected: started_at,
                        found: marker.start_time,
                    })
                }
            }
        }
    }

    fn cancel_ticker(&mut self) {
        if let Some(token) = self.ticker.take() {
            token.cancel();
        }
    }
}

impl<S, R> Drop for ShiftClock<S, R> {
    fn drop(&mut self) {
        if let Some(token) = self.ticker.take() {
            token.cancel();
        }
    }
}

impl<S, R> std::fmt::Debug for ShiftClock<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShiftClock")
            .field("worker", &self.worker)
            .field("state", &self.state)
            .field("calculator", &self.calculator)
            .finish_non_exhaustive()
    }
}
