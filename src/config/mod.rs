//! Configuration loading and management for the Shift Engine.
//!
//! This module provides functionality to load the night window, expense rule,
//! live clock interval and store settings from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use shift_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/shift_engine.yaml").unwrap();
//! println!("Night window starts at {}:00", config.rules().night_window.start_hour);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ClockConfig, DEFAULT_EXPENSE_EURO, DEFAULT_EXPENSE_THRESHOLD_HOURS, DEFAULT_NIGHT_END_HOUR,
    DEFAULT_NIGHT_START_HOUR, DEFAULT_POLL_INTERVAL_MS, EngineConfig, ExpenseRule, NightWindow,
    StoreConfig, StoreKind, WorkRules,
};
