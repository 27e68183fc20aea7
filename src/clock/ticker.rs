//! Live metric ticks for an open shift.
//!
//! A [`LiveTicker`] is a subscription: a background task recomputes the open
//! shift's metrics on a fixed cadence and delivers them over a channel. It
//! stops when cancelled, when dropped, or when the owning clock stops the
//! shift. Once cancelled, [`LiveTicker::recv`] returns `None` and ticks still
//! buffered in the channel are discarded.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::calculation::WorkDetailCalculator;
use crate::models::WorkDetails;

const TICK_BUFFER: usize = 16;

/// Source of the current local wall-clock time.
pub trait WallClock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> NaiveDateTime;
}

/// The system's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl WallClock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// One live recomputation of an open shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveTick {
    /// When the metrics were computed.
    pub at: NaiveDateTime,
    /// Metrics from the shift start to `at`.
    pub details: WorkDetails,
}

/// A cancellable subscription to live ticks.
#[derive(Debug)]
pub struct LiveTicker {
    receiver: mpsc::Receiver<LiveTick>,
    cancel: CancellationToken,
}

impl LiveTicker {
    /// Spawns the tick task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub(crate) fn spawn(
        started_at: NaiveDateTime,
        calculator: WorkDetailCalculator,
        wall_clock: Arc<dyn WallClock>,
        period: Duration,
        cancel: CancellationToken,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(TICK_BUFFER);
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            debug!(started_at = %started_at, period_ms = period.as_millis() as u64, "Live ticker started");

            loop {
                tokio::select! {
                    biased;
                    _ = task_cancel.cancelled() => {
                        debug!(started_at = %started_at, "Live ticker cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        let at = wall_clock.now();
                        let tick = LiveTick {
                            at,
                            details: calculator.compute_or_zero(started_at, at),
                        };
                        match sender.try_send(tick) {
                            Ok(()) => {}
                            Err(TrySendError::Full(_)) => {
                                debug!("Live tick dropped, subscriber is behind");
                            }
                            Err(TrySendError::Closed(_)) => break,
                        }
                    }
                }
            }
        });

        Self { receiver, cancel }
    }

    /// Waits for the next tick. Returns `None` once the ticker is cancelled,
    /// even if ticks are still buffered.
    pub async fn recv(&mut self) -> Option<LiveTick> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            tick = self.receiver.recv() => tick,
        }
    }

    /// Stops the ticker. No tick is delivered by [`recv`](Self::recv) after
    /// this returns.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns true once the ticker was cancelled by any party.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for LiveTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    struct FixedClock(NaiveDateTime);

    impl WallClock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn spawn_fixed(started_at: &str, now: &str) -> LiveTicker {
        LiveTicker::spawn(
            make_datetime(started_at),
            WorkDetailCalculator::default(),
            Arc::new(FixedClock(make_datetime(now))),
            Duration::from_millis(5),
            CancellationToken::new(),
        )
    }

    #[tokio::test]
    async fn test_ticks_carry_live_metrics() {
        let mut ticker = spawn_fixed("2026-01-15 21:30:00", "2026-01-15 23:30:00");

        let tick = ticker.recv().await.unwrap();
        assert_eq!(tick.at, make_datetime("2026-01-15 23:30:00"));
        assert_eq!(tick.details.duration_hours, Decimal::new(2, 0));
        assert_eq!(tick.details.night_hours, Decimal::new(15, 1));
    }

    #[tokio::test]
    async fn test_cancel_closes_channel() {
        let mut ticker = spawn_fixed("2026-01-15 08:00:00", "2026-01-15 09:00:00");
        assert!(ticker.recv().await.is_some());

        ticker.cancel();
        assert!(ticker.is_cancelled());
        assert!(ticker.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_discards_buffered_ticks() {
        let mut ticker = spawn_fixed("2026-01-15 08:00:00", "2026-01-15 09:00:00");

        // Let the channel fill up without reading it
        tokio::time::sleep(Duration::from_millis(60)).await;
        ticker.cancel();

        let mut delivered = 0;
        while ticker.recv().await.is_some() {
            delivered += 1;
        }
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_drop_cancels_token() {
        let token = CancellationToken::new();
        let ticker = LiveTicker::spawn(
            make_datetime("2026-01-15 08:00:00"),
            WorkDetailCalculator::default(),
            Arc::new(LocalClock),
            Duration::from_millis(5),
            token.clone(),
        );

        drop(ticker);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_local_clock_moves_forward() {
        let first = LocalClock.now();
        let second = LocalClock.now();
        assert!(second >= first);
    }
}
