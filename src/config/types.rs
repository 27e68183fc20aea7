//! Configuration types for shift accounting.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section falls
//! back to the standard rules when omitted.

use std::path::PathBuf;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Default start of the night window (22:00).
pub const DEFAULT_NIGHT_START_HOUR: u32 = 22;

/// Default end of the night window (06:00, exclusive).
pub const DEFAULT_NIGHT_END_HOUR: u32 = 6;

/// Shifts strictly longer than this many hours earn the expense allowance.
pub const DEFAULT_EXPENSE_THRESHOLD_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Flat expense allowance in euro (13.00).
pub const DEFAULT_EXPENSE_EURO: Decimal = Decimal::from_parts(1300, 0, 0, false, 2);

/// Default cadence of live ticks in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// The wall-clock hours that count as night work.
///
/// The window covers `[start_hour, end_hour)` and wraps past midnight when
/// `start_hour > end_hour`. Equal bounds describe an empty window.
///
/// # Example
///
/// ```
/// use shift_engine::config::NightWindow;
///
/// let window = NightWindow::default();
/// assert!(window.contains(22));
/// assert!(window.contains(5));
/// assert!(!window.contains(6));
/// assert!(!window.contains(21));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NightWindow {
    /// First hour of the window (inclusive).
    pub start_hour: u32,
    /// Hour at which the window closes (exclusive).
    pub end_hour: u32,
}

impl Default for NightWindow {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_NIGHT_START_HOUR,
            end_hour: DEFAULT_NIGHT_END_HOUR,
        }
    }
}

impl NightWindow {
    /// Returns true if the given hour-of-day falls inside the window.
    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour > self.end_hour {
            hour >= self.start_hour || hour < self.end_hour
        } else {
            hour >= self.start_hour && hour < self.end_hour
        }
    }
}

/// Single-tier expense allowance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExpenseRule {
    /// Shifts must be strictly longer than this to qualify.
    pub threshold_hours: Decimal,
    /// The flat amount paid to qualifying shifts.
    pub amount_euro: Decimal,
}

impl Default for ExpenseRule {
    fn default() -> Self {
        Self {
            threshold_hours: DEFAULT_EXPENSE_THRESHOLD_HOURS,
            amount_euro: DEFAULT_EXPENSE_EURO,
        }
    }
}

/// The rules applied by the work detail calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct WorkRules {
    /// Which hours count as night work.
    #[serde(default)]
    pub night_window: NightWindow,
    /// When the expense allowance is paid.
    #[serde(default)]
    pub expense: ExpenseRule,
}

/// Live clock settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClockConfig {
    /// Milliseconds between live ticks.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl ClockConfig {
    /// Returns the tick cadence as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

/// Which key-value store backs markers and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// Process-local map; contents are lost on exit.
    #[default]
    Memory,
    /// One JSON file per key under `path`.
    File,
}

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StoreConfig {
    /// The store implementation.
    #[serde(default)]
    pub kind: StoreKind,
    /// Data directory, required for [`StoreKind::File`].
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// The complete engine configuration loaded from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct EngineConfig {
    /// Calculation rules.
    #[serde(default)]
    pub rules: WorkRules,
    /// Live clock settings.
    #[serde(default)]
    pub clock: ClockConfig,
    /// Store settings.
    #[serde(default)]
    pub store: StoreConfig,
}

impl EngineConfig {
    /// Checks that every value is within range.
    pub fn validate(&self) -> EngineResult<()> {
        let window = &self.rules.night_window;
        if window.start_hour >= 24 {
            return Err(invalid("rules.night_window.start_hour", "must be below 24"));
        }
        if window.end_hour >= 24 {
            return Err(invalid("rules.night_window.end_hour", "must be below 24"));
        }
        if self.rules.expense.threshold_hours.is_sign_negative() {
            return Err(invalid("rules.expense.threshold_hours", "must not be negative"));
        }
        if self.rules.expense.amount_euro.is_sign_negative() {
            return Err(invalid("rules.expense.amount_euro", "must not be negative"));
        }
        if self.clock.poll_interval_ms == 0 {
            return Err(invalid("clock.poll_interval_ms", "must be greater than zero"));
        }
        if self.store.kind == StoreKind::File && self.store.path.is_none() {
            return Err(invalid("store.path", "required when store.kind is 'file'"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}
