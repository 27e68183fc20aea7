//! Persistence of active shift markers.

use crate::error::EngineResult;
use crate::models::ActiveShiftMarker;
use crate::store::{KeyValueStore, active_shift_key, read_json, write_json};

/// Reads the active marker for `worker_id`, if one is persisted.
pub fn load_marker<S>(store: &S, worker_id: &str) -> EngineResult<Option<ActiveShiftMarker>>
where
    S: KeyValueStore + ?Sized,
{
    read_json(store, &active_shift_key(worker_id))
}

/// Persists `marker` under its worker's key.
pub fn save_marker<S>(store: &S, marker: &ActiveShiftMarker) -> EngineResult<()>
where
    S: KeyValueStore + ?Sized,
{
    write_json(store, &active_shift_key(&marker.worker_id), marker)
}

/// Removes the active marker for `worker_id`.
pub fn clear_marker<S>(store: &S, worker_id: &str) -> EngineResult<()>
where
    S: KeyValueStore + ?Sized,
{
    store.remove(&active_shift_key(worker_id))
}
