//! Worker identity model.
//!
//! Workers are stamped onto every [`WorkLogEntry`](super::WorkLogEntry) at
//! creation time, so the name recorded there never changes afterwards.

use serde::{Deserialize, Serialize};

/// The role a worker plays in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Records shifts.
    Driver,
    /// Supervisor who reads reports but does not record shifts.
    Chef,
}

/// A worker as supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier for the worker.
    pub id: String,
    /// Display name, copied onto each log entry.
    pub name: String,
    /// The worker's role.
    pub role: Role,
}

impl Worker {
    /// Creates a worker in the [`Role::Driver`] role.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_engine::models::{Role, Worker};
    ///
    /// let worker = Worker::driver("driver_001", "Max Mustermann");
    /// assert_eq!(worker.role, Role::Driver);
    /// assert!(worker.is_driver());
    /// ```
    pub fn driver(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: Role::Driver,
        }
    }

    /// Returns true if the worker records shifts.
    pub fn is_driver(&self) -> bool {
        self.role == Role::Driver
    }
}
