use super::kv::{read_json, write_json, KeyValueStore, ACTIVE_PAUSE_KEY};
use crate::domain::ActivePause;
use crate::error::{PauseError, PauseResult};

/// Load the in-flight break left behind by a previous run
pub fn load_active_pause(store: &dyn KeyValueStore) -> PauseResult<Option<ActivePause>> {
    read_json(store, ACTIVE_PAUSE_KEY)
}

pub fn save_active_pause(store: &dyn KeyValueStore, active: &ActivePause) -> PauseResult<()> {
    write_json(store, ACTIVE_PAUSE_KEY, active)
}

pub fn clear_active_pause(store: &dyn KeyValueStore) -> PauseResult<()> {
    store
        .remove(ACTIVE_PAUSE_KEY)
        .map_err(|e| PauseError::write(ACTIVE_PAUSE_KEY, e))
}
