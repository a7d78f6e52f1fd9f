use super::kv::{read_json, write_json, KeyValueStore, PAUSES_KEY};
use crate::domain::{Category, PauseRecord};
use crate::error::{PauseError, PauseResult};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Newest-first log of completed breaks.
///
/// Every mutation rewrites the whole persisted sequence, so mutators run one
/// at a time behind `write_lock`.
pub struct PauseRecordStore {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl PauseRecordStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Load all records, newest first
    pub fn list(&self) -> PauseResult<Vec<PauseRecord>> {
        Ok(read_json(self.store.as_ref(), PAUSES_KEY)?.unwrap_or_default())
    }

    /// Load all records, degrading to an empty history when the log can't be read
    pub fn list_or_empty(&self) -> (Vec<PauseRecord>, Option<PauseError>) {
        match self.list() {
            Ok(records) => (records, None),
            Err(e) => {
                warn!("could not load pause history: {}", e);
                (Vec::new(), Some(e))
            }
        }
    }

    /// Insert a record at the head of the log
    pub fn append(&self, record: PauseRecord) -> PauseResult<()> {
        let _guard = self.lock();
        let mut records = self.list()?;
        let id = record.id.clone();
        records.insert(0, record);
        write_json(self.store.as_ref(), PAUSES_KEY, &records)?;
        info!(id = %id, total = records.len(), "pause recorded");
        Ok(())
    }

    /// Delete a record; returns false when no record has that id
    pub fn remove(&self, id: &str) -> PauseResult<bool> {
        let _guard = self.lock();
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            debug!(id, "remove ignored, no such pause");
            return Ok(false);
        }
        write_json(self.store.as_ref(), PAUSES_KEY, &records)?;
        info!(id, "pause deleted");
        Ok(true)
    }

    /// Re-tag a record; returns false when no record has that id
    pub fn set_category(&self, id: &str, category: Category) -> PauseResult<bool> {
        let _guard = self.lock();
        let mut records = self.list()?;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            debug!(id, "set_category ignored, no such pause");
            return Ok(false);
        };
        record.category = category;
        write_json(self.store.as_ref(), PAUSES_KEY, &records)?;
        info!(id, category = category.as_str(), "pause categorized");
        Ok(true)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // guards no data
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
