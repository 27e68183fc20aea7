//! Identity of the worker operating a clock.

use crate::error::EngineResult;
use crate::models::Worker;

/// Supplies the worker on whose behalf shifts are recorded.
///
/// Session handling and authentication live outside the engine; this trait
/// is the only thing the engine needs from them.
pub trait IdentityProvider {
    /// Returns the current worker.
    fn current_worker(&self) -> EngineResult<Worker>;
}

/// An identity fixed at construction time.
///
/// # Example
///
/// ```
/// use shift_engine::identity::{IdentityProvider, StaticIdentity};
/// use shift_engine::models::Worker;
///
/// let identity = StaticIdentity::new(Worker::driver("driver_001", "Max Mustermann"));
/// assert_eq!(identity.current_worker().unwrap().name, "Max Mustermann");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    worker: Worker,
}

impl StaticIdentity {
    /// Wraps a known worker.
    pub fn new(worker: Worker) -> Self {
        Self { worker }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_worker(&self) -> EngineResult<Worker> {
        Ok(self.worker.clone())
    }
}
